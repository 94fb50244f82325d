//! Prompt templates for every pipeline stage.
//!
//! Each builder returns the complete prompt text. Stages that expect JSON ask
//! for raw JSON; the normalizer still strips fences when the model adds them.

use std::fmt::Write as _;

use serde_json::json;
use wicket_core::Row;
use wicket_core::entities::{ConversationMessage, DataSet, KeyStat, PipelineStep};

use crate::stages::ExtractedClaim;

const NARRATIVE_STYLE: &str = "\
NARRATIVE STYLE:
1. Open with a scene, not a thesis.
2. Move naturally between \"you\", \"we\" and \"I\".
3. Mix short punchy sentences with longer flowing ones.
4. Use single-sentence paragraphs for emphasis.
5. Ask rhetorical questions to build momentum.
6. Tell player examples as stories, not bullet points.
7. Close with an invitation or a question, not a summary.

STATISTICAL RIGOR:
- Quote specific numbers from the data.
- State sample sizes (N=X).
- Translate statistics into plain English.
- Acknowledge limitations honestly.";

const CHART_TYPES: &str = "\
Available chart types:
- bar: comparing categories
- horizontal-bar: many categories or long labels
- line: trends over time
- area: cumulative trends
- pie: part-to-whole (at most 6 slices)
- scatter: correlation between two numeric variables
- radar: multi-dimensional comparison
- composed: bar and line combined";

fn json_sample(rows: &[Row], limit: usize) -> String {
    serde_json::to_string(&rows[..rows.len().min(limit)]).unwrap_or_default()
}

fn json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Single question to a single SQL query.
#[must_use]
pub fn generate_sql(schema: &str, question: &str) -> String {
    format!(
        "You are an expert cricket analyst.

{schema}

Convert the following question into one valid DuckDB SQL query.
Return ONLY the SQL. No markdown formatting, no explanation.

Question: {question}
"
    )
}

/// Break a question into analytical steps, each with its SQL.
#[must_use]
pub fn decompose(schema: &str, question: &str, max_steps: u32) -> String {
    format!(
        r#"You are a cricket analytics expert with deep SQL expertise.

A user wants to understand a cricket topic. Your job is to:
1. Work out which analytical angles would best answer the question, without waiting to be told.
2. Break it into exactly {max_steps} analytical steps.
3. Write one valid DuckDB SQL query for each step.

{schema}

User's question:
"{question}"

Angles worth considering:
- Overall aggregates (career totals, averages, strike rates)
- Year-by-year or era-wise trends
- Opposition-wise breakdown
- Venue, country, home and away patterns
- Format differences (ODI, T20, Test) when relevant
- Phase of innings (powerplay, middle overs, death overs)
- Comparison with peers or benchmarks
- Context (batting first vs chasing, toss)
- Pressure situations and big matches
- Partnerships when several players are involved

Pick the {max_steps} most insightful angles. Go beyond the literal question.

Return a JSON array, raw JSON only:
[
  {{
    "step_number": 1,
    "title": "Short title for this angle",
    "research_question": "The specific question this step answers",
    "sql_query": "SELECT ... FROM ..."
  }}
]

SQL requirements:
- DuckDB syntax
- Appropriate GROUP BY and ORDER BY
- LIMIT 50 unless aggregating everything
- Clear column aliases (AS strike_rate, AS avg_runs)
- Handle NULLs
- Tables: balls, matches, commentary
"#
    )
}

/// Turn executed steps into an article.
#[must_use]
pub fn synthesize_article(question: &str, steps: &[PipelineStep]) -> String {
    let mut context = String::new();
    for step in steps {
        let _ = write!(
            context,
            "\n### Step {}: {}\nResearch question: {}\n",
            step.step_number, step.title, step.research_question
        );
        if let Some(rows) = step.result_rows.as_deref().filter(|r| !r.is_empty()) {
            let _ = write!(
                context,
                "Results (sample): {}\nTotal records: {}\n",
                json_sample(rows, 10),
                rows.len()
            );
        }
        if let Some(error) = &step.error_text {
            let _ = writeln!(context, "Error: {error}");
        }
    }

    format!(
        r#"You are a cricket analytics writer.

Original request:
"{question}"

Analytical steps completed:
{context}

Write a full analysis.

{NARRATIVE_STYLE}

Return a JSON object with exactly this structure, raw JSON only:
{{
  "title": "Compelling title",
  "executive_summary": "2-3 sentence summary of the key findings",
  "article": "The full 1200-1800 word article in markdown",
  "tweet": "One tweet under 280 characters with 2 key points and a [link] placeholder",
  "methodology": "Short methodology section",
  "limitations": "Key limitations"
}}
"#
    )
}

/// Suggest charts for the steps that returned data.
#[must_use]
pub fn recommend_charts(steps: &[PipelineStep]) -> String {
    let described: Vec<_> = steps
        .iter()
        .filter_map(|step| {
            let first = step.result_rows.as_ref()?.first()?;
            Some(json!({
                "step_number": step.step_number,
                "title": step.title,
                "columns": first.keys().collect::<Vec<_>>(),
                "row_count": step.row_count(),
                "sample_row": first,
            }))
        })
        .collect();

    format!(
        r#"You are a data visualization expert for cricket analytics.

Analytical steps and their data:
{data}

{CHART_TYPES}

Return a JSON array, raw JSON only:
[
  {{
    "chart_type": "bar",
    "title": "Title that states the insight, not the data",
    "data_key": "step_1",
    "x_axis": "column_name",
    "y_axis": "column_name",
    "description": "What this chart reveals"
  }}
]

Recommend 3-6 charts.
"#,
        data = json_pretty(&described)
    )
}

/// Turn an exploratory conversation into a publishable article.
#[must_use]
pub fn synthesize_conversation(
    title: &str,
    conversation: &[ConversationMessage],
    data_sets: &[DataSet],
) -> String {
    let mut history = String::new();
    for message in conversation {
        let _ = write!(
            history,
            "\n**{}**: {}\n",
            message.role.as_str().to_uppercase(),
            message.content
        );
        if let Some(sql) = &message.sql_query {
            let _ = writeln!(history, "SQL: {sql}");
        }
        if let Some(rows) = message.data.as_deref().filter(|r| !r.is_empty()) {
            let _ = writeln!(history, "Data (sample): {}", json_sample(rows, 5));
        }
    }

    let mut collected = String::new();
    for (index, set) in data_sets.iter().enumerate() {
        let _ = write!(
            collected,
            "\nDataset {}:\nContext: {}\nRecords: {}\nSample: {}\n",
            index + 1,
            set.query_context,
            set.row_count,
            json_sample(&set.data, 3)
        );
    }
    let total: usize = data_sets.iter().map(|s| s.row_count).sum();

    format!(
        r#"You are a cricket analytics writer creating a publication-ready article.

Project title: "{title}"

CONVERSATION HISTORY:
{history}

DATA COLLECTED:
{collected}
Total records analyzed: {total}

{NARRATIVE_STYLE}

FACTUAL ACCURACY:
- Only use statistics that appear in the data.
- Do not invent scenes or quotes.
- Use real player names from the data.

Return a JSON object with exactly this structure, raw JSON only:
{{
  "executive_summary": "2-3 sentences on the key findings",
  "article": "The full 1400-2000 word article in markdown, with section headers",
  "tweet": "One tweet under 280 characters with 2 key findings and a [link] placeholder",
  "key_stats": [
    {{"label": "Stat name", "value": "X%", "context": "Brief context"}}
  ],
  "methodology": "Paragraph on methodology",
  "limitations": "Paragraph on limitations",
  "verification_notes": "How the findings can be verified"
}}
"#
    )
}

/// Suggest charts for the data sets of a finalized conversation.
#[must_use]
pub fn recommend_charts_for_data_sets(data_sets: &[DataSet]) -> String {
    let described: Vec<_> = data_sets
        .iter()
        .enumerate()
        .filter_map(|(index, set)| {
            let first = set.data.first()?;
            Some(json!({
                "dataset_index": index,
                "context": set.query_context.chars().take(100).collect::<String>(),
                "columns": first.keys().collect::<Vec<_>>(),
                "row_count": set.row_count,
                "sample": first,
            }))
        })
        .collect();

    format!(
        r#"You are a data visualization expert creating charts for a cricket analytics publication.

Data available:
{data}

Create 4-8 chart recommendations that tell a visual story.

{CHART_TYPES}

Chart titles state the insight, not the data.
Good: "Accelerators Convert 35% More Often"
Bad: "Conversion Rate by Acceleration Category"

Return a JSON array, raw JSON only:
[
  {{
    "chart_type": "bar",
    "title": "Insight-revealing title",
    "data_key": "dataset_0",
    "x_axis": "column_name",
    "y_axis": "column_name",
    "description": "What this chart shows"
  }}
]
"#,
        data = json_pretty(&described)
    )
}

/// List every checkable claim in an article.
#[must_use]
pub fn extract_claims(article: &str, key_stats: &[KeyStat]) -> String {
    format!(
        r#"You are a fact-checker for cricket analytics articles.

Extract every verifiable claim from this article that can be checked against:
1. Database queries (statistical claims)
2. General cricket knowledge (facts about matches, players, dates)

ARTICLE:
{article}

KEY STATS PROVIDED:
{stats}

For each claim give the exact text, its type (statistical, factual,
player_stat, match_detail), the claimed value, and how to verify it.

Return a JSON array, raw JSON only:
[
  {{
    "claim_id": 1,
    "claim_text": "Exact quote from the article",
    "claim_type": "statistical",
    "expected_value": "32.9%",
    "verification_method": "database_query",
    "sql_hint": "Dismissal rate for decelerators"
  }},
  {{
    "claim_id": 2,
    "claim_text": "Dhoni scored 50 in the 2019 World Cup semi-final",
    "claim_type": "match_detail",
    "expected_value": "50",
    "verification_method": "web_search",
    "search_hint": "MS Dhoni 2019 World Cup semi-final score vs New Zealand"
  }}
]

Include every claim with a specific number, percentage, player statistic or match detail.
"#,
        stats = serde_json::to_string(key_stats).unwrap_or_default()
    )
}

/// Independent SQL that recomputes a claimed value.
#[must_use]
pub fn verify_with_database(schema: &str, claim: &ExtractedClaim) -> String {
    format!(
        r#"You are verifying a statistical claim from a cricket analytics article.

{schema}

CLAIM TO VERIFY:
"{text}"

Expected value: {expected}
Hint: {hint}

Write one SQL query that independently computes the value so it can be
compared with the expected value. Put that value in the first column.

Return ONLY the SQL. No markdown, no explanation.
"#,
        text = claim.claim_text,
        expected = claim.expected_value.as_deref().unwrap_or("unknown"),
        hint = claim.sql_hint.as_deref().unwrap_or_default(),
    )
}

/// Ask the model to check a claim from what it already knows.
#[must_use]
pub fn verify_with_recall(claim: &ExtractedClaim) -> String {
    format!(
        r#"You are a cricket fact-checker verifying a claim from memory.
No search is performed; answer from your own knowledge of cricket history and statistics.

CLAIM: "{text}"
Expected value: {expected}
Search hint: {hint}

1. Is the claim accurate?
2. What is the correct information?
3. If there is a discrepancy, explain it.

Return a JSON object, raw JSON only:
{{
  "search_query": "The search you would run to confirm this",
  "is_accurate": true,
  "actual_value": "The correct value",
  "source_hint": "Where this can be confirmed (e.g. ESPNcricinfo)",
  "explanation": "Brief explanation"
}}
"#,
        text = claim.claim_text,
        expected = claim.expected_value.as_deref().unwrap_or("unknown"),
        hint = claim.search_hint.as_deref().unwrap_or_default(),
    )
}
