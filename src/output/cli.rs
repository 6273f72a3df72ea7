use super::TrackReport;
use crate::model::ResolvedDependency;
use crate::severity::Severity;
use anyhow::Result;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Vulnerable")]
    vulnerable: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct DependencyRow {
    #[tabled(rename = "Dependency")]
    name: String,
    #[tabled(rename = "Vulnerable")]
    vulnerable: String,
    #[tabled(rename = "Max Score")]
    max_score: String,
    #[tabled(rename = "Vulnerabilities")]
    ids: String,
}

pub fn print_cli_table(report: &TrackReport) -> Result<()> {
    println!("{}", render(report, true));
    Ok(())
}

/// Renders the report as plain tables, without terminal colors.
pub(crate) fn render_tables(report: &TrackReport) -> String {
    render(report, false)
}

fn render(report: &TrackReport, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Report generated at: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if !report.projects.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Registered {} project(s):", report.projects.len());
        let _ = writeln!(out);

        let rows: Vec<ProjectRow> = report
            .projects
            .iter()
            .map(|section| ProjectRow {
                name: truncate(&section.project.name, 30),
                description: truncate(&section.project.description, 40),
                vulnerable: yes_no(section.project.vulnerable),
                severity: format_severity(section.project.severity, color),
                id: section.project.id.clone(),
            })
            .collect();

        let _ = writeln!(out, "{}", Table::new(rows).with(Style::rounded()));

        for section in &report.projects {
            if let Some(dependencies) = &section.dependencies {
                let _ = writeln!(out);
                let _ = writeln!(out, "Dependencies of {}:", section.project.name);
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", dependency_table(dependencies));
            }
        }
    }

    if !report.dependencies.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", dependency_table(&report.dependencies));
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", summary(report));

    out
}

fn dependency_table(dependencies: &[ResolvedDependency]) -> String {
    if dependencies.is_empty() {
        return "No dependencies.".to_string();
    }

    let rows: Vec<DependencyRow> = dependencies
        .iter()
        .map(|d| DependencyRow {
            name: truncate(&d.name, 40),
            vulnerable: yes_no(d.vulnerable),
            max_score: max_score(d)
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "-".to_string()),
            ids: if d.vulnerabilities.is_empty() {
                "-".to_string()
            } else {
                let ids: Vec<&str> = d.vulnerabilities.iter().map(|v| v.id.as_str()).collect();
                truncate(&ids.join(", "), 50)
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn summary(report: &TrackReport) -> String {
    let mut out = String::from("Summary:\n");

    if !report.projects.is_empty() {
        let vulnerable = report
            .projects
            .iter()
            .filter(|s| s.project.vulnerable)
            .count();
        let _ = writeln!(
            out,
            "  Projects: {} ({} vulnerable)",
            report.projects.len(),
            vulnerable
        );

        let highest = report
            .projects
            .iter()
            .map(|s| s.project.severity)
            .max()
            .unwrap_or(Severity::None);
        let _ = writeln!(out, "  Highest severity: {}", highest);
    }

    if !report.dependencies.is_empty() {
        let vulnerable = report.dependencies.iter().filter(|d| d.vulnerable).count();
        let _ = writeln!(
            out,
            "  Dependencies: {} ({} vulnerable)",
            report.dependencies.len(),
            vulnerable
        );
    }

    out
}

fn max_score(dependency: &ResolvedDependency) -> Option<f64> {
    dependency
        .vulnerabilities
        .iter()
        .map(|v| v.score)
        .reduce(f64::max)
}

fn format_severity(severity: Severity, color: bool) -> String {
    if !color {
        return severity.to_string();
    }

    match severity {
        Severity::High => "\x1b[91mHigh\x1b[0m".to_string(),
        Severity::Medium => "\x1b[33mMedium\x1b[0m".to_string(),
        Severity::Low => "\x1b[32mLow\x1b[0m".to_string(),
        Severity::None => "None".to_string(),
    }
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
