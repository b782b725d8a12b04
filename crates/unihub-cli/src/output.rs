//! Output formatting for query results.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use serde::Serialize;
use unihub_core::{IndexStats, ResourceId, ResourceRecord};

/// JSON output structure for record listings
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    /// What was asked for, e.g. `search "graphs"`
    pub query: String,
    pub count: usize,
    pub results: Vec<JsonResource<'a>>,
}

/// One resource in JSON format
#[derive(Serialize)]
pub struct JsonResource<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub resource_type: &'a str,
    pub subject: &'a str,
    pub uploader: &'a str,
    pub size_bytes: u64,
    pub upload_time: u64,
    pub download_count: u64,
    pub rating: f64,
    pub tags: &'a [String],
}

impl<'a> From<&'a ResourceRecord> for JsonResource<'a> {
    fn from(record: &'a ResourceRecord) -> Self {
        Self {
            id: record.id.as_str(),
            display_name: &record.display_name,
            resource_type: &record.resource_type,
            subject: &record.subject,
            uploader: &record.uploader,
            size_bytes: record.size_bytes,
            upload_time: record.upload_time,
            download_count: record.download_count,
            rating: record.rating,
            tags: &record.tags,
        }
    }
}

/// Formats records as JSON.
pub fn format_json(query: &str, records: &[&ResourceRecord]) -> String {
    let output = JsonOutput {
        query: query.to_string(),
        count: records.len(),
        results: records.iter().map(|r| JsonResource::from(*r)).collect(),
    };
    to_pretty_json(&output)
}

/// Formats records for human-readable terminal output.
pub fn format_human(query: &str, records: &[&ResourceRecord]) -> String {
    if records.is_empty() {
        return format!("No resources found for {}", query);
    }

    let mut output = format!(
        "Found {} resource{} for {}:\n\n",
        records.len(),
        plural(records.len()),
        query
    );

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, record.display_name));

        let mut details = Vec::new();
        if !record.resource_type.is_empty() {
            details.push(record.resource_type.clone());
        }
        if !record.subject.is_empty() {
            details.push(record.subject.clone());
        }
        details.push(format!(
            "{} download{}",
            record.download_count,
            plural(record.download_count as usize)
        ));
        if record.rating > 0.0 {
            details.push(format!("rated {:.1}", record.rating));
        }
        output.push_str(&format!("   [{}]\n", details.join(", ")));

        output.push_str(&format!("   Path: {}\n", record.id));
        if !record.uploader.is_empty() {
            output.push_str(&format!("   Uploaded by {}\n", record.uploader));
        }
        if !record.tags.is_empty() {
            output.push_str(&format!("   Tags: {}\n", record.tags.join(", ")));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Formats a single record, or its JSON form.
pub fn format_record(record: &ResourceRecord, json: bool) -> String {
    if json {
        return to_pretty_json(&JsonResource::from(record));
    }
    format_human(&format!("\"{}\"", record.id), &[record])
}

/// Formats plain names (autocomplete) or identifiers (related resources).
pub fn format_names<S: AsRef<str> + Serialize>(query: &str, names: &[S], json: bool) -> String {
    if json {
        #[derive(Serialize)]
        struct JsonNames<'a, S> {
            query: &'a str,
            count: usize,
            results: &'a [S],
        }
        return to_pretty_json(&JsonNames {
            query,
            count: names.len(),
            results: names,
        });
    }

    if names.is_empty() {
        return format!("No matches for {}", query);
    }
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats related identifiers.
pub fn format_related(id: &str, related: &[ResourceId], json: bool) -> String {
    format_names(&format!("related to \"{}\"", id), related, json)
}

/// Formats index statistics.
pub fn format_stats(stats: &IndexStats, json: bool) -> String {
    if json {
        return to_pretty_json(stats);
    }

    [
        ("Resources", stats.resources),
        ("Distinct names", stats.distinct_names),
        ("Keyword tokens", stats.tokens),
        ("Relationships", stats.relationships),
        ("Tags", stats.tags),
        ("Uploaders", stats.uploaders),
    ]
    .iter()
    .map(|(label, value)| format!("{:<16}{}", label, value))
    .collect::<Vec<_>>()
    .join("\n")
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResourceRecord {
        ResourceRecord::new("res/CSE201/Notes/ds.pdf", "Data Structures")
            .with_type("Notes")
            .with_subject("CSE201")
            .with_uploader("asha")
            .with_download_count(1)
            .with_rating(4.5)
            .with_tags(["trees", "graphs"])
    }

    #[test]
    fn test_format_human_empty() {
        let output = format_human("search \"x\"", &[]);
        assert_eq!(output, "No resources found for search \"x\"");
    }

    #[test]
    fn test_format_human_single() {
        let record = sample();
        let output = format_human("tag \"trees\"", &[&record]);
        assert!(output.starts_with("Found 1 resource for tag \"trees\":"));
        assert!(output.contains("1. Data Structures"));
        assert!(output.contains("[Notes, CSE201, 1 download, rated 4.5]"));
        assert!(output.contains("Path: res/CSE201/Notes/ds.pdf"));
        assert!(output.contains("Uploaded by asha"));
        assert!(output.contains("Tags: trees, graphs"));
    }

    #[test]
    fn test_format_json() {
        let record = sample();
        let output = format_json("popular", &[&record]);
        assert!(output.contains("\"query\": \"popular\""));
        assert!(output.contains("\"count\": 1"));
        assert!(output.contains("\"id\": \"res/CSE201/Notes/ds.pdf\""));
        assert!(output.contains("\"download_count\": 1"));

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["results"][0]["tags"][1], "graphs");
    }

    #[test]
    fn test_format_names() {
        let names = vec!["Algorithms I".to_string(), "Algorithms II".to_string()];
        assert_eq!(
            format_names("\"Algo\"", &names, false),
            "Algorithms I\nAlgorithms II"
        );
        assert_eq!(
            format_names::<String>("\"Zzz\"", &[], false),
            "No matches for \"Zzz\""
        );

        let json = format_names("\"Algo\"", &names, true);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["count"], 2);
    }

    #[test]
    fn test_format_related_json_uses_plain_ids() {
        let related = vec![ResourceId::from("a.pdf")];
        let json = format_related("b.pdf", &related, true);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["results"][0], "a.pdf");
    }

    #[test]
    fn test_format_stats() {
        let stats = IndexStats {
            resources: 3,
            relationships: 1,
            ..IndexStats::default()
        };
        let human = format_stats(&stats, false);
        assert!(human.contains("Resources       3"));
        assert!(human.contains("Relationships   1"));

        let json = format_stats(&stats, true);
        assert!(json.contains("\"resources\": 3"));
    }
}
