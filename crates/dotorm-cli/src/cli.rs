use dotorm::{StatementKind, Value};
use std::path::PathBuf;

pub const DEFAULT_SCHEMA: &str = "dotorm.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Select,
    Insert,
    Update,
    Delete,
    Check,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Statement(StatementArgs),
    Check(CheckArgs),
}

#[derive(Debug, Clone)]
pub struct StatementArgs {
    pub schema: PathBuf,
    pub kind: StatementKind,
    pub entity: String,
    /// Selected columns; empty for everything but SELECT.
    pub columns: Vec<String>,
    /// `key=value` pairs in command-line order.
    pub kwargs: Vec<(String, Value)>,
    pub with_params: bool,
}

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub schema: PathBuf,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());

    let mut schema = PathBuf::from(DEFAULT_SCHEMA);
    let mut with_params = false;
    let mut help = false;
    let mut positional: Vec<&str> = Vec::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => help = true,
            "--schema" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--schema requires a value");
                };
                schema = PathBuf::from(v);
            }
            _ if token.starts_with("--schema=") => {
                schema = PathBuf::from(token.trim_start_matches("--schema="));
            }
            "--with-params" => with_params = true,
            other if other.starts_with("--") => anyhow::bail!("unknown argument: {other}"),
            other => positional.push(other),
        }
    }

    let mut positional = positional.into_iter();
    let Some(command) = positional.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    let kind = match command {
        "help" => return Ok(Command::Help(HelpTopic::Root)),
        "check" => {
            if help {
                return Ok(Command::Help(HelpTopic::Check));
            }
            if let Some(extra) = positional.next() {
                anyhow::bail!("unexpected argument: {extra}");
            }
            return Ok(Command::Check(CheckArgs { schema }));
        }
        "select" => StatementKind::Select,
        "insert" => StatementKind::Insert,
        "update" => StatementKind::Update,
        "delete" => StatementKind::Delete,
        other => anyhow::bail!("unknown command: {other}"),
    };

    if help {
        return Ok(Command::Help(match kind {
            StatementKind::Select => HelpTopic::Select,
            StatementKind::Insert => HelpTopic::Insert,
            StatementKind::Update => HelpTopic::Update,
            StatementKind::Delete => HelpTopic::Delete,
        }));
    }

    let Some(entity) = positional.next() else {
        anyhow::bail!("missing entity: expected `dotorm {command} <Entity>`");
    };

    let mut columns = Vec::new();
    let mut kwargs = Vec::new();
    for token in positional {
        match token.split_once('=') {
            Some((key, raw)) => {
                if key.is_empty() {
                    anyhow::bail!("missing key in argument: {token}");
                }
                kwargs.push((key.to_string(), parse_value(raw)));
            }
            None if kind == StatementKind::Select => columns.push(token.to_string()),
            None => anyhow::bail!("expected key=value, got: {token}"),
        }
    }

    if kind == StatementKind::Select && columns.is_empty() {
        anyhow::bail!("select needs at least one column");
    }

    Ok(Command::Statement(StatementArgs {
        schema,
        kind,
        entity: entity.to_string(),
        columns,
        kwargs,
        with_params,
    }))
}

/// Interpret a command-line value.
///
/// JSON literals (`42`, `1.5`, `true`, `null`, arrays, objects) come first.
/// A quoted JSON string is always text. Anything else is text too, except
/// that unquoted ISO dates and datetimes are detected.
pub fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => Value::Text(s),
        Ok(json) => Value::from_json(json),
        Err(_) => Value::from_json(serde_json::Value::String(raw.to_string())),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
dotorm - build SQL statements from attribute paths

USAGE:
  dotorm [OPTIONS] <COMMAND> <Entity> [ARGS]

COMMANDS:
  select        SELECT columns, with optional filters
  insert        INSERT a row
  update        UPDATE rows (where__ keys filter)
  delete        DELETE rows
  check         Validate the schema file

GLOBAL OPTIONS:
  --schema <FILE>       Schema file path (default: dotorm.toml)
  --with-params         Also print the parameters as JSON
  -h, --help            Print help

Run `dotorm <command> --help` for more."
            );
        }
        HelpTopic::Select => {
            println!(
                "\
USAGE:
  dotorm select <Entity> <column>... [key=value]...

Columns are dotted attribute paths (`name`, `pet.name`, `pet.vet.city`).
Filters take an optional comparison suffix: __lt __le __gt __ge __ne.

EXAMPLE:
  dotorm select Person name pet.name pet__weight__gt=5"
            );
        }
        HelpTopic::Insert => {
            println!(
                "\
USAGE:
  dotorm insert <Entity> <attribute=value>...

Only plain attribute names of the entity are accepted.

EXAMPLE:
  dotorm insert Pet name=Rex weight=4.5"
            );
        }
        HelpTopic::Update => {
            println!(
                "\
USAGE:
  dotorm update <Entity> <path=value>... [where__path=value]...

Keys prefixed with where__ become the WHERE clause.

EXAMPLE:
  dotorm update Person age=31 where__name=Ann"
            );
        }
        HelpTopic::Delete => {
            println!(
                "\
USAGE:
  dotorm delete <Entity> [path=value]...

Without filters every row of the entity is deleted.

EXAMPLE:
  dotorm delete Person pet__name=Rex"
            );
        }
        HelpTopic::Check => {
            println!(
                "\
USAGE:
  dotorm check [--schema <FILE>]

Loads the schema, checks relation targets, and lists the entities."
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dotorm")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parse_no_args_is_help() {
        let cmd = parse_args(&args(&[])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Root)));
    }

    #[test]
    fn parse_select_columns_and_filters() {
        let cmd = parse_args(&args(&[
            "select",
            "Person",
            "name",
            "pet.name",
            "pet__weight__gt=5",
            "--schema",
            "zoo.toml",
        ]))
        .unwrap();
        let Command::Statement(stmt) = cmd else {
            panic!("expected statement");
        };

        assert_eq!(stmt.kind, StatementKind::Select);
        assert_eq!(stmt.entity, "Person");
        assert_eq!(stmt.columns, vec!["name", "pet.name"]);
        assert_eq!(
            stmt.kwargs,
            vec![("pet__weight__gt".to_string(), Value::Int(5))]
        );
        assert_eq!(stmt.schema, PathBuf::from("zoo.toml"));
        assert!(!stmt.with_params);
    }

    #[test]
    fn parse_update_keeps_argument_order() {
        let cmd = parse_args(&args(&[
            "--schema=db/schema.toml",
            "update",
            "Person",
            "where__name=Ann",
            "age=31",
            "--with-params",
        ]))
        .unwrap();
        let Command::Statement(stmt) = cmd else {
            panic!("expected statement");
        };

        assert_eq!(stmt.kind, StatementKind::Update);
        assert_eq!(stmt.schema, PathBuf::from("db/schema.toml"));
        let keys: Vec<_> = stmt.kwargs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["where__name", "age"]);
        assert!(stmt.with_params);
    }

    #[test]
    fn parse_mutation_rejects_bare_tokens() {
        let err = parse_args(&args(&["insert", "Pet", "name"])).unwrap_err();
        assert!(err.to_string().contains("expected key=value"));
    }

    #[test]
    fn parse_select_requires_columns() {
        assert!(parse_args(&args(&["select", "Person", "name=Ann"])).is_err());
    }

    #[test]
    fn parse_missing_entity() {
        let err = parse_args(&args(&["delete"])).unwrap_err();
        assert!(err.to_string().contains("missing entity"));
    }

    #[test]
    fn parse_subcommand_help() {
        let cmd = parse_args(&args(&["update", "--help"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Update)));
        let cmd = parse_args(&args(&["check", "-h"])).unwrap();
        assert!(matches!(cmd, Command::Help(HelpTopic::Check)));
    }

    #[test]
    fn parse_unknown_command_and_flag() {
        assert!(parse_args(&args(&["drop", "Person"])).is_err());
        assert!(parse_args(&args(&["check", "--verbose"])).is_err());
        assert!(parse_args(&args(&["--schema"])).is_err());
    }

    #[test]
    fn parse_value_literals() {
        assert_eq!(parse_value("42"), Value::Int(42));
        assert_eq!(parse_value("4.5"), Value::Float(4.5));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("Rex"), Value::Text("Rex".to_string()));
        assert_eq!(parse_value("\"42\""), Value::Text("42".to_string()));
        assert!(matches!(parse_value("2024-01-31"), Value::Date(_)));
        assert!(matches!(parse_value("2024-01-31T10:00:00"), Value::DateTime(_)));
        assert!(matches!(parse_value("[1,2]"), Value::Json(_)));
    }

    #[test]
    fn parse_value_quoted_date_stays_text() {
        assert_eq!(
            parse_value("\"2024-01-31\""),
            Value::Text("2024-01-31".to_string())
        );
        assert_eq!(
            parse_value("\"2024-01-31T10:00:00\""),
            Value::Text("2024-01-31T10:00:00".to_string())
        );
    }
}
