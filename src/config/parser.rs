use crate::config::types::{Account, ParsedAccount, RawAccountFile, Rule, RuleRejection};
use crate::error::{DystillError, Result};
use std::path::Path;

/// Parse an account file from the given path.
pub fn parse_account_file(path: &Path) -> Result<ParsedAccount> {
	let content = std::fs::read_to_string(path).map_err(|source| DystillError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_account_str(&content, path)
}

/// Parse an account from a string (useful for testing).
///
/// Missing or invalid credentials fail the whole account. Invalid rule entries
/// are dropped and reported in [`ParsedAccount::rejected_rules`].
pub fn parse_account_str(content: &str, path: &Path) -> Result<ParsedAccount> {
	let raw: RawAccountFile =
		toml::from_str(content).map_err(|source| DystillError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	let credentials = match raw.credentials {
		None => toml::Table::new(),
		Some(toml::Value::Table(table)) => table,
		Some(_) => {
			return Err(DystillError::InvalidFieldType {
				path: path.to_path_buf(),
				field: "credentials".to_string(),
				expected: "a table",
			});
		}
	};

	let name = required_string(&credentials, "account_name", "credentials", path)?;
	let token = required_string(&credentials, "account_token", "credentials", path)?;

	let mut rules = Vec::new();
	let mut rejected_rules = Vec::new();

	match raw.rules {
		None => {}
		Some(toml::Value::Array(entries)) => {
			for (index, entry) in entries.iter().enumerate() {
				match parse_rule(entry, index, path) {
					Ok(rule) => rules.push(rule),
					Err(error) => rejected_rules.push(RuleRejection { index, error }),
				}
			}
		}
		Some(_) => rejected_rules.push(RuleRejection {
			index: 0,
			error: DystillError::InvalidFieldType {
				path: path.to_path_buf(),
				field: "rules".to_string(),
				expected: "an array",
			},
		}),
	}

	Ok(ParsedAccount {
		account: Account {
			name,
			token,
			source_file: path.to_path_buf(),
			rules,
		},
		rejected_rules,
	})
}

fn parse_rule(entry: &toml::Value, index: usize, path: &Path) -> Result<Rule> {
	let section = format!("rules[{index}]");
	let table = entry
		.as_table()
		.ok_or_else(|| DystillError::InvalidFieldType {
			path: path.to_path_buf(),
			field: section.clone(),
			expected: "a table",
		})?;

	Ok(Rule {
		filter: required_string(table, "filter", &section, path)?,
		action: required_string(table, "action", &section, path)?,
	})
}

/// Extract a non-empty string value, naming the field as `section.key` in errors.
fn required_string(table: &toml::Table, key: &str, section: &str, path: &Path) -> Result<String> {
	let field = || format!("{section}.{key}");

	let value = table.get(key).ok_or_else(|| DystillError::MissingField {
		path: path.to_path_buf(),
		field: field(),
	})?;

	let value = value.as_str().ok_or_else(|| DystillError::InvalidFieldType {
		path: path.to_path_buf(),
		field: field(),
		expected: "a string",
	})?;

	if value.is_empty() {
		return Err(DystillError::EmptyField {
			path: path.to_path_buf(),
			field: field(),
		});
	}

	Ok(value.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	fn parse(content: &str) -> Result<ParsedAccount> {
		parse_account_str(content, &PathBuf::from("account.toml"))
	}

	#[test]
	fn test_parse_account_with_rules() {
		let content = r#"
[credentials]
account_name = "A"
account_token = "T"

[[rules]]
filter = "from:x.com"
action = "spam"

[[rules]]
filter = "subject:y"
action = "flag"
"#;
		let parsed = parse(content).unwrap();
		let account = parsed.account;

		assert_eq!(account.name, "A");
		assert_eq!(account.token, "T");
		assert_eq!(account.source_file, PathBuf::from("account.toml"));
		assert_eq!(
			account.rules,
			vec![
				Rule {
					filter: "from:x.com".to_string(),
					action: "spam".to_string(),
				},
				Rule {
					filter: "subject:y".to_string(),
					action: "flag".to_string(),
				},
			]
		);
		assert!(parsed.rejected_rules.is_empty());
	}

	#[test]
	fn test_rules_default_to_empty() {
		let content = r#"
[credentials]
account_name = "A"
account_token = "T"
"#;
		let parsed = parse(content).unwrap();
		assert!(parsed.account.rules.is_empty());
	}

	#[test]
	fn test_rules_inline_tables() {
		let content = r#"
rules = [
    { filter = "from:a", action = "archive" },
    { filter = "from:b", action = "delete" },
]

[credentials]
account_name = "A"
account_token = "T"
"#;
		let parsed = parse(content).unwrap();
		assert_eq!(parsed.account.rules.len(), 2);
		assert_eq!(parsed.account.rules[1].action, "delete");
	}

	#[test]
	fn test_malformed_rules_are_dropped_in_order() {
		let content = r#"
[credentials]
account_name = "A"
account_token = "T"

[[rules]]
filter = "first"
action = "keep"

[[rules]]
filter = "no action"

[[rules]]
action = "no filter"

[[rules]]
filter = "last"
action = "keep"
"#;
		let parsed = parse(content).unwrap();

		let filters: Vec<_> = parsed
			.account
			.rules
			.iter()
			.map(|rule| rule.filter.as_str())
			.collect();
		assert_eq!(filters, vec!["first", "last"]);

		let indices: Vec<_> = parsed.rejected_rules.iter().map(|r| r.index).collect();
		assert_eq!(indices, vec![1, 2]);

		match &parsed.rejected_rules[0].error {
			DystillError::MissingField { field, .. } => assert_eq!(field, "rules[1].action"),
			other => panic!("Expected MissingField error, got {other:?}"),
		}
		match &parsed.rejected_rules[1].error {
			DystillError::MissingField { field, .. } => assert_eq!(field, "rules[2].filter"),
			other => panic!("Expected MissingField error, got {other:?}"),
		}
	}

	#[test]
	fn test_rule_with_wrong_types_is_dropped() {
		let content = r#"
rules = ["not a table", { filter = 5, action = "spam" }, { filter = "", action = "spam" }]

[credentials]
account_name = "A"
account_token = "T"
"#;
		let parsed = parse(content).unwrap();
		assert!(parsed.account.rules.is_empty());
		assert_eq!(parsed.rejected_rules.len(), 3);
		assert!(matches!(
			parsed.rejected_rules[0].error,
			DystillError::InvalidFieldType {
				expected: "a table",
				..
			}
		));
		assert!(matches!(
			parsed.rejected_rules[1].error,
			DystillError::InvalidFieldType {
				expected: "a string",
				..
			}
		));
		assert!(matches!(
			parsed.rejected_rules[2].error,
			DystillError::EmptyField { .. }
		));
	}

	#[test]
	fn test_missing_token_fails_account() {
		let content = r#"
[credentials]
account_name = "A"

[[rules]]
filter = "from:x.com"
action = "spam"
"#;
		match parse(content).unwrap_err() {
			DystillError::MissingField { field, path } => {
				assert_eq!(field, "credentials.account_token");
				assert_eq!(path, PathBuf::from("account.toml"));
			}
			other => panic!("Expected MissingField error, got {other:?}"),
		}
	}

	#[test]
	fn test_missing_credentials_section_fails_account() {
		match parse("").unwrap_err() {
			DystillError::MissingField { field, .. } => {
				assert_eq!(field, "credentials.account_name");
			}
			other => panic!("Expected MissingField error, got {other:?}"),
		}
	}

	#[test]
	fn test_empty_name_fails_account() {
		let content = r#"
[credentials]
account_name = ""
account_token = "T"
"#;
		assert!(matches!(
			parse(content).unwrap_err(),
			DystillError::EmptyField { .. }
		));
	}

	#[test]
	fn test_non_string_token_fails_account() {
		let content = r#"
[credentials]
account_name = "A"
account_token = 1234
"#;
		match parse(content).unwrap_err() {
			DystillError::InvalidFieldType { field, expected, .. } => {
				assert_eq!(field, "credentials.account_token");
				assert_eq!(expected, "a string");
			}
			other => panic!("Expected InvalidFieldType error, got {other:?}"),
		}
	}

	#[test]
	fn test_unknown_keys_are_ignored() {
		let content = r#"
version = 2

[credentials]
account_name = "A"
account_token = "T"
server = "imap.example.com"

[[rules]]
filter = "from:x.com"
action = "spam"
priority = 1
"#;
		let parsed = parse(content).unwrap();
		assert_eq!(parsed.account.rules.len(), 1);
		assert!(parsed.rejected_rules.is_empty());
	}

	#[test]
	fn test_invalid_toml() {
		let err = parse("invalid toml [[[").unwrap_err();
		assert!(matches!(err, DystillError::ConfigParseError { .. }));
		assert!(err.is_parse_failure());
	}

	#[test]
	fn test_credentials_not_a_table_fails_account() {
		let content = r#"
credentials = "A:T"
"#;
		let err = parse(content).unwrap_err();
		assert!(!err.is_parse_failure());
		match err {
			DystillError::InvalidFieldType { field, expected, .. } => {
				assert_eq!(field, "credentials");
				assert_eq!(expected, "a table");
			}
			other => panic!("Expected InvalidFieldType error, got {other:?}"),
		}
	}

	#[test]
	fn test_rules_not_an_array_keeps_account() {
		for rules in [
			"rules = \"spam everything\"\n",
			"[rules]\nfilter = \"from:x\"\naction = \"spam\"\n",
		] {
			let content = format!(
				"{rules}\n[credentials]\naccount_name = \"A\"\naccount_token = \"T\"\n"
			);
			let parsed = parse(&content).unwrap();

			assert_eq!(parsed.account.name, "A");
			assert!(parsed.account.rules.is_empty());
			assert_eq!(parsed.rejected_rules.len(), 1);
			assert_eq!(parsed.rejected_rules[0].index, 0);
			match &parsed.rejected_rules[0].error {
				DystillError::InvalidFieldType { field, expected, .. } => {
					assert_eq!(field, "rules");
					assert_eq!(*expected, "an array");
				}
				other => panic!("Expected InvalidFieldType error, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_parse_account_file_missing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let err = parse_account_file(&temp_dir.path().join("account.toml")).unwrap_err();
		assert!(matches!(err, DystillError::ConfigReadError { .. }));
		assert!(err.is_parse_failure());
	}

	#[test]
	fn test_parse_account_file_sets_source() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("account-work.toml");
		std::fs::write(
			&path,
			"[credentials]\naccount_name = \"work\"\naccount_token = \"secret\"\n",
		)
		.unwrap();

		let parsed = parse_account_file(&path).unwrap();
		assert_eq!(parsed.account.source_file, path);
		assert_eq!(parsed.account.name, "work");
	}
}
