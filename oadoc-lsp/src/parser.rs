//! Line-oriented scanning of endpoint documents.
//!
//! Works on pretty-printed JSON (`"key": value`) and block YAML (`key: value`,
//! `- key: value`). Positions found here are matched to the parsed [`Endpoint`]
//! by order of appearance, and dropped when the counts do not line up.

use std::ops::Range;

use oadoc::Endpoint;
use once_cell::sync::Lazy;
use regex::Regex;

// Static regex patterns to avoid recompilation
static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(\s*(?:-\s+)?)("?)([A-Za-z]+)"?\s*:"#).unwrap());
static VALUE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(?:-\s+)?"?([A-Za-z]+)"?\s*:\s*"?([A-Za-z]*)$"#).unwrap());
static SCALAR_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#":\s*"?([^",\s]*)"?"#).unwrap());
static KEY_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*(?:[{,]\s*)?(?:-\s+)?"?([A-Za-z]*)$"#).unwrap());

/// A mapping key found at the start of a line
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMatch {
    pub name: String,
    /// Byte offset of the key name (after any quote)
    pub start: usize,
    /// Byte offset just past the key name
    pub end: usize,
}

/// Key that opens `line`, if any.
pub fn key_at_line(line: &str) -> Option<KeyMatch> {
    let captures = KEY_RE.captures(line)?;
    let name = captures.get(3)?;
    Some(KeyMatch {
        name: name.as_str().to_string(),
        start: name.start(),
        end: name.end(),
    })
}

/// Raw value of the first `method` key, even when the document does not parse.
pub fn method_name(content: &str) -> Option<String> {
    let line = content
        .lines()
        .find(|line| key_at_line(line).is_some_and(|found| found.name == "method"))?;
    let captures = SCALAR_VALUE_RE.captures(line)?;
    let value = captures.get(1)?.as_str();
    (!value.is_empty()).then(|| value.to_string())
}

/// Key whose value is being typed at the end of `prefix`, with the partial value.
pub fn value_context(prefix: &str) -> Option<(String, String)> {
    let captures = VALUE_PREFIX_RE.captures(prefix)?;
    Some((
        captures.get(1)?.as_str().to_string(),
        captures.get(2)?.as_str().to_string(),
    ))
}

/// Partial key being typed at the end of `prefix`.
pub fn key_prefix(prefix: &str) -> Option<String> {
    let captures = KEY_PREFIX_RE.captures(prefix)?;
    Some(captures.get(1)?.as_str().to_string())
}

/// Which list an entry under the cursor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Parameters,
    Fields,
    Responses,
    Other,
}

/// Section whose list block contains `line_idx`.
pub fn section_at(content: &str, line_idx: usize) -> Section {
    let lines: Vec<&str> = content.lines().collect();
    let sections = [
        ("parameters", Section::Parameters),
        ("requestBodyJsonFields", Section::Fields),
        ("responses", Section::Responses),
    ];

    sections
        .into_iter()
        .find(|(key, _)| {
            list_block(&lines, key).is_some_and(|block| block.contains(&line_idx))
        })
        .map_or(Section::Other, |(_, section)| section)
}

/// Lines from the shallowest `key` up to the next key at the same or a lower depth.
fn list_block(lines: &[&str], key: &str) -> Option<Range<usize>> {
    let (start, list) = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            key_at_line(line)
                .filter(|found| found.name == key)
                .map(|found| (idx, found))
        })
        .min_by_key(|(_, found)| found.start)?;

    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| key_at_line(line).is_some_and(|found| found.start <= list.start))
        .map_or(lines.len(), |(idx, _)| idx);

    Some(start..end)
}

/// First line of each entry in the list under `key`.
///
/// An entry starts at a key on a `- ` item line (YAML) or right after a line
/// holding only `{` (JSON), at the shallowest key depth of the block. Keys of
/// nested objects, e.g. inside a response `example`, are never entry starts.
fn entry_starts(lines: &[&str], key: &str) -> Vec<usize> {
    let Some(block) = list_block(lines, key) else {
        return Vec::new();
    };

    let keys: Vec<(usize, usize, bool)> = block
        .clone()
        .skip(1)
        .filter_map(|idx| {
            let found = key_at_line(lines[idx])?;
            let opens_item = lines[idx].trim_start().starts_with('-')
                || lines[block.start..idx]
                    .iter()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .is_some_and(|line| line.trim() == "{");
            Some((idx, found.start, opens_item))
        })
        .collect();

    let Some(depth) = keys.iter().map(|(_, start, _)| *start).min() else {
        return Vec::new();
    };
    keys.into_iter()
        .filter(|(_, start, opens_item)| *start == depth && *opens_item)
        .map(|(idx, _, _)| idx)
        .collect()
}

/// Document lines of the endpoint's list entries.
///
/// Each list is `None` when the entries found do not match the parsed
/// endpoint, e.g. for compact one-line JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryLines {
    /// First line of each parameter entry
    pub parameters: Option<Vec<usize>>,
    /// First line of each response entry
    pub responses: Option<Vec<usize>>,
    /// Path and line of each body field's `property` key, depth first
    pub fields: Option<Vec<(Vec<usize>, usize)>>,
    /// Line of the `requestBodyJsonFields` key
    pub body: Option<usize>,
}

impl EntryLines {
    pub fn scan(content: &str, endpoint: &Endpoint) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let parameters = matched(entry_starts(&lines, "parameters"), endpoint.parameters.len());
        let responses = matched(entry_starts(&lines, "responses"), endpoint.responses.len());

        let body_block = list_block(&lines, "requestBodyJsonFields");
        let property_lines = body_block
            .clone()
            .map(|block| {
                block
                    .filter(|idx| {
                        key_at_line(lines[*idx]).is_some_and(|found| found.name == "property")
                    })
                    .collect()
            })
            .unwrap_or_default();
        let paths = endpoint.field_paths();
        let fields = matched(property_lines, paths.len())
            .map(|lines| paths.into_iter().zip(lines).collect());

        Self {
            parameters,
            responses,
            fields,
            body: body_block.map(|block| block.start),
        }
    }

    /// Line of the field at `path`, falling back to the body key.
    pub fn field_line(&self, path: &[usize]) -> Option<usize> {
        self.fields
            .as_ref()
            .and_then(|fields| fields.iter().find(|(p, _)| p == path))
            .map(|(_, line)| *line)
            .or(self.body)
    }
}

fn matched(lines: Vec<usize>, expected: usize) -> Option<Vec<usize>> {
    (lines.len() == expected).then_some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_json_and_yaml_keys() {
        let json = key_at_line(r#"    "operationId": "x","#).unwrap();
        assert_eq!(json.name, "operationId");
        assert_eq!(json.start, 5);
        assert_eq!(json.end, 16);

        let yaml = key_at_line("  - name: id").unwrap();
        assert_eq!(yaml.name, "name");
        assert_eq!(yaml.start, 4);

        assert!(key_at_line("      1,").is_none());
    }

    #[test]
    fn reads_method_from_broken_documents() {
        let content = "{\n  \"method\": \"delete\",\n  \"path\": ";
        assert_eq!(method_name(content), Some("delete".to_string()));
        assert_eq!(method_name("method: PATCH\n"), Some("PATCH".to_string()));
        assert_eq!(method_name("path: /x\n"), None);
    }

    #[test]
    fn value_context_for_json_and_yaml() {
        assert_eq!(
            value_context(r#"      "in": "qu"#),
            Some(("in".to_string(), "qu".to_string()))
        );
        assert_eq!(
            value_context("    schemaType: "),
            Some(("schemaType".to_string(), String::new()))
        );
        assert_eq!(value_context(r#"  "path": "/users/"#), None);
    }

    #[test]
    fn key_prefix_at_line_start() {
        assert_eq!(key_prefix(r#"      "sche"#), Some("sche".to_string()));
        assert_eq!(key_prefix("  - na"), Some("na".to_string()));
        assert_eq!(key_prefix("    "), Some(String::new()));
        assert_eq!(key_prefix(r#"  "in": "#), None);
    }

    #[test]
    fn section_is_the_enclosing_list() {
        let content = r#"{
  "method": "post",
  "parameters": [
    {
      "name": "id",
      "schemaType": "integer"
    }
  ],
  "requestBodyJsonFields": [
    {
      "property": "x",
      "schemaType": "string"
    }
  ]
}"#;
        assert_eq!(section_at(content, 5), Section::Parameters);
        assert_eq!(section_at(content, 11), Section::Fields);
        assert_eq!(section_at(content, 1), Section::Other);
    }

    #[test]
    fn nested_example_keys_are_not_entries() {
        let content = r#"{
  "method": "post",
  "responses": [
    {
      "code": "200",
      "example": {
        "code": 7,
        "name": "x"
      }
    },
    {
      "description": "Fallback"
    }
  ]
}"#;
        let endpoint = oadoc::document::parse(content, oadoc::DocumentFormat::Json).unwrap();
        let entries = EntryLines::scan(content, &endpoint);

        assert_eq!(entries.responses, Some(vec![4, 11]));
        assert_eq!(entries.parameters, Some(vec![]));
        assert_eq!(section_at(content, 7), Section::Responses);
    }

    #[test]
    fn yaml_entries_start_at_item_lines() {
        let content = "\
method: get
parameters:
  - name: id
    in: path
  - in: query
    name: q
responses:
  - code: 200
";
        let endpoint = oadoc::document::parse(content, oadoc::DocumentFormat::Yaml).unwrap();
        let entries = EntryLines::scan(content, &endpoint);

        assert_eq!(entries.parameters, Some(vec![2, 4]));
        assert_eq!(entries.responses, Some(vec![7]));
        assert_eq!(section_at(content, 5), Section::Parameters);
        assert_eq!(section_at(content, 0), Section::Other);
    }
}
