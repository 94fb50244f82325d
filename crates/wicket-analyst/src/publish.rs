//! Writing a validated project to disk.
//!
//! ```text
//! <output>/<slug>/
//!     article.md
//!     tweet.txt
//!     metadata.json
//!     validation_report.json
//!     data/<table_id>.csv
//!     charts/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::{Value, json};
use wicket_core::Row;
use wicket_core::errors::CoreError;
use wicket_core::entities::{ProjectOutput, ValidationReport};
use wicket_core::requests::PublishRequest;
use wicket_core::responses::PublishResponse;
use wicket_core::slug::ensure_path_component;
use wicket_llm::ModelClient;

use crate::Analyst;
use crate::error::{AnalystError, PublishError};

impl<C: ModelClient> Analyst<C> {
    /// Publish a project bundle under the configured output directory, or
    /// under `output_folder` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::NotReady`] unless the report recommends
    /// publishing, [`PublishError::UnsafePath`] for an output folder, slug or
    /// table id that is not made of plain path components, and I/O errors
    /// from writing.
    pub async fn publish(&self, request: PublishRequest) -> Result<PublishResponse, AnalystError> {
        let root = output_root(&self.settings.output_dir, request.output_folder.as_deref())?;

        let response = tokio::task::spawn_blocking(move || {
            write_bundle(&root, &request.project, &request.validation)
        })
        .await??;
        tracing::info!(slug = %response.slug, files = response.files_created.len(), "project published");
        Ok(response)
    }
}

/// Write the bundle for `project` under `root` after checking the gate.
///
/// Nothing is written when the gate refuses or an identifier is unsafe.
///
/// # Errors
///
/// See [`Analyst::publish`].
pub fn write_bundle(
    root: &Path,
    project: &ProjectOutput,
    validation: &ValidationReport,
) -> Result<PublishResponse, PublishError> {
    if !validation.is_publishable() {
        return Err(PublishError::NotReady {
            recommendation: validation.recommendation,
            score: validation.verification_score,
        });
    }

    let slug = ensure_path_component(&project.slug)?;
    let tables = project
        .data_tables
        .iter()
        .filter(|table| !table.data.is_empty())
        .map(|table| {
            let id = if table.table_id.is_empty() {
                "data"
            } else {
                table.table_id.as_str()
            };
            ensure_path_component(id).map(|id| (id, &table.data))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let project_dir = root.join(slug);
    let data_dir = project_dir.join("data");
    create_dir(&data_dir)?;
    create_dir(&project_dir.join("charts"))?;

    let mut files = Vec::new();
    write_file(&project_dir.join("article.md"), &article_markdown(project), &mut files)?;
    write_file(&project_dir.join("tweet.txt"), &project.tweet, &mut files)?;
    for (id, rows) in tables {
        write_file(&data_dir.join(format!("{id}.csv")), &rows_to_csv(rows), &mut files)?;
    }
    let metadata = serde_json::to_string_pretty(&metadata(project, validation))?;
    write_file(&project_dir.join("metadata.json"), &metadata, &mut files)?;
    let report = serde_json::to_string_pretty(validation)?;
    write_file(&project_dir.join("validation_report.json"), &report, &mut files)?;

    Ok(PublishResponse {
        success: true,
        slug: slug.to_string(),
        message: format!(
            "Project '{}' published successfully with {} files.",
            project.title,
            files.len()
        ),
        files_created: files.iter().map(|p| p.display().to_string()).collect(),
        project_path: project_dir.display().to_string(),
    })
}

/// `base` joined with each `/`-separated segment of `folder`. Absolute paths
/// and `..` are refused; a blank folder means `base` itself.
fn output_root(base: &Path, folder: Option<&str>) -> Result<PathBuf, PublishError> {
    let Some(folder) = folder.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(base.to_path_buf());
    };
    if folder.starts_with('/') {
        return Err(CoreError::UnsafePathComponent(folder.to_string()).into());
    }

    let mut root = base.to_path_buf();
    for segment in folder.split('/').filter(|s| !s.is_empty() && *s != ".") {
        root.push(ensure_path_component(segment)?);
    }
    Ok(root)
}

fn create_dir(path: &Path) -> Result<(), PublishError> {
    fs::create_dir_all(path).map_err(|source| PublishError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str, files: &mut Vec<PathBuf>) -> Result<(), PublishError> {
    fs::write(path, contents).map_err(|source| PublishError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    files.push(path.to_path_buf());
    Ok(())
}

fn article_markdown(project: &ProjectOutput) -> String {
    format!(
        "# {title}\n\n**Author:** {author}\n**Date:** {date}\n\n---\n\n\
         ## Executive Summary\n\n{summary}\n\n---\n\n{article}\n\n---\n\n\
         ## Methodology\n\n{methodology}\n\n## Limitations\n\n{limitations}\n\n\
         ## Verification\n\n{verification}\n",
        title = project.title,
        author = project.author,
        date = project.date,
        summary = project.executive_summary,
        article = project.article_markdown,
        methodology = project.methodology,
        limitations = project.limitations,
        verification = project.verification_notes,
    )
}

fn metadata(project: &ProjectOutput, validation: &ValidationReport) -> Value {
    json!({
        "slug": project.slug,
        "title": project.title,
        "author": project.author,
        "date": project.date,
        "executive_summary": project.executive_summary,
        "key_stats": project.key_stats,
        "charts": project.charts,
        "validation": {
            "status": validation.overall_status,
            "score": validation.verification_score,
            "claims_verified": validation.verified_claims,
            "claims_total": validation.total_claims,
        },
        "published_at": Local::now().to_rfc3339(),
    })
}

/// RFC 4180 CSV with the first row's columns as header. Missing and null
/// cells are empty.
fn rows_to_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let columns: Vec<&String> = first.keys().collect();

    let mut out = String::new();
    push_record(&mut out, columns.iter().map(|c| c.as_str().into()));
    for row in rows {
        push_record(
            &mut out,
            columns.iter().map(|column| match row.get(*column) {
                None | Some(Value::Null) => String::new().into(),
                Some(Value::String(s)) => s.as_str().into(),
                Some(other) => other.to_string().into(),
            }),
        );
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = std::borrow::Cow<'a, str>>) {
    for (index, field) in fields.enumerate() {
        if index > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\r', '\n']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&field);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn csv_quotes_and_blanks() {
        let csv = rows_to_csv(&rows(json!([
            {"batter": "de Villiers, AB", "runs": 5162, "note": "said \"360\""},
            {"batter": "MS Dhoni", "runs": null},
        ])));
        assert_eq!(
            csv,
            "batter,runs,note\r\n\"de Villiers, AB\",5162,\"said \"\"360\"\"\"\r\nMS Dhoni,,\r\n"
        );
    }

    #[test]
    fn csv_of_no_rows_is_empty() {
        assert_eq!(rows_to_csv(&[]), "");
    }

    #[test]
    fn output_folder_stays_under_the_base() {
        let base = Path::new("outputs");
        assert_eq!(output_root(base, None).unwrap(), base);
        assert_eq!(output_root(base, Some("  ")).unwrap(), base);
        assert_eq!(
            output_root(base, Some("site/2024/")).unwrap(),
            base.join("site").join("2024")
        );
    }

    #[test]
    fn output_folder_cannot_escape() {
        for folder in ["/tmp/site", "../site", "site/../../etc", "a\\b"] {
            assert!(
                matches!(output_root(Path::new("outputs"), Some(folder)), Err(PublishError::UnsafePath(_))),
                "{folder}"
            );
        }
    }

    #[test]
    fn article_has_header_and_sections() {
        let project = ProjectOutput {
            slug: "s".into(),
            title: "Death Overs".into(),
            author: "A. Writer".into(),
            date: "2024-05-01".into(),
            executive_summary: "Short.".into(),
            article_markdown: "Body.".into(),
            tweet: String::new(),
            key_stats: Vec::new(),
            charts: Vec::new(),
            data_tables: Vec::new(),
            methodology: "SQL.".into(),
            limitations: "Few.".into(),
            verification_notes: "Checked.".into(),
        };
        let md = article_markdown(&project);
        assert!(md.starts_with("# Death Overs\n\n**Author:** A. Writer\n**Date:** 2024-05-01\n"));
        assert!(md.contains("## Executive Summary\n\nShort.\n\n---\n\nBody.\n\n---\n\n## Methodology"));
        assert!(md.ends_with("## Verification\n\nChecked.\n"));
    }
}
