//! Help/usage rendering: a pure function from the registry to display text.

use crate::error::ParseError;
use crate::spec::ArgSpec;

/// Render usage text for the registered specs.
///
/// When `error` is set, the diagnostic appears above the usage text so a
/// host can print one string after a failed parse.
pub(crate) fn render(
    program: Option<&str>,
    description: Option<&str>,
    specs: &[ArgSpec<'_>],
    error: Option<&ParseError>,
) -> String {
    let mut out = String::new();

    if let Some(error) = error {
        out.push_str(&format!("error: {error}\n\n"));
    }
    if let Some(description) = description {
        out.push_str(description.trim());
        out.push_str("\n\n");
    }

    out.push_str(&format!("Usage: {} [OPTIONS]", program.unwrap_or("program")));
    let mut positional = 0usize;
    for spec in specs {
        if !spec.is_positional() {
            continue;
        }
        positional += 1;
        if spec.required() {
            out.push_str(&format!(" <ARG{positional}>"));
        } else {
            out.push_str(&format!(" [ARG{positional}]"));
        }
    }
    out.push('\n');

    let mut arguments: Vec<(String, String)> = Vec::new();
    let mut options: Vec<(String, String)> = Vec::new();
    let mut positional = 0usize;
    for spec in specs {
        if spec.is_positional() {
            positional += 1;
            let left = if spec.required() {
                format!("<ARG{positional}>")
            } else {
                format!("[ARG{positional}]")
            };
            arguments.push((left, right_column(spec)));
        } else {
            let mut left = spec.names.join(", ");
            if spec.takes_value() {
                left.push_str(&format!(" <{}>", value_name(spec)));
            }
            options.push((left, right_column(spec)));
        }
    }
    options.push(("-h, --help".to_string(), "Show help information".to_string()));

    if !arguments.is_empty() {
        out.push_str("\nArguments:\n");
        push_rows(&mut out, &arguments);
    }
    out.push_str("\nOptions:\n");
    push_rows(&mut out, &options);

    out
}

fn push_rows(out: &mut String, rows: &[(String, String)]) {
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
}

fn right_column(spec: &ArgSpec<'_>) -> String {
    let mut text = spec.help_text().unwrap_or_default();
    if spec.required() && !spec.is_positional() {
        if text.is_empty() {
            text.push_str("required");
        } else {
            text.push_str(" (required)");
        }
    }
    text
}

/// Placeholder for an option's value, derived from its first name:
/// `--repeat` renders as `<REPEAT>`.
fn value_name(spec: &ArgSpec<'_>) -> String {
    spec.names
        .first()
        .map(|name| name.trim_start_matches('-').to_ascii_uppercase())
        .unwrap_or_else(|| "VALUE".to_string())
}

#[cfg(test)]
mod tests {
    use crate::Parser;

    #[test]
    fn renders_sections_and_markers() {
        let mut verbose = false;
        let mut repeats = 1_i32;
        let mut text = String::new();
        let mut trailing = String::new();

        let mut parser = Parser::with_description("print a string a number of times");
        parser.add_flag(&mut verbose, ["--verbose", "-v"]).help("say what happens");
        parser.add_option(&mut repeats, "--repeat").help("how many times");
        parser.add_positional(&mut text).required().help("the string to print");
        parser.add_positional(&mut trailing);

        assert!(parser.parse(["repeat", "hello"]));
        let help = parser.help();

        assert!(help.starts_with("print a string a number of times\n"));
        assert!(help.contains("Usage: repeat [OPTIONS] <ARG1> [ARG2]\n"));
        assert!(help.contains("Arguments:\n"));
        assert!(help.contains("<ARG1>"));
        assert!(help.contains("the string to print"));
        assert!(help.contains("Options:\n"));
        assert!(help.contains("--verbose, -v"));
        assert!(help.contains("--repeat <REPEAT>"));
        assert!(help.contains("-h, --help"));
    }

    #[test]
    fn failed_parse_prefixes_diagnostic() {
        let mut needed = String::new();

        let mut parser = Parser::new();
        parser.add_positional(&mut needed).required();

        assert!(!parser.parse(["prog"]));
        let help = parser.help();
        assert!(help.starts_with("error: missing required argument: positional 1\n"));
        assert!(help.contains("Usage: prog [OPTIONS] <ARG1>\n"));
    }

    #[test]
    fn usage_falls_back_without_program_name() {
        let parser = Parser::new();
        assert!(parser.help().contains("Usage: program [OPTIONS]\n"));
    }
}
