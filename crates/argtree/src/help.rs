//! Help and version rendering, plus the `-h/--help` and `-v/--version`
//! presets built on top of it.

use std::io::{self, Write};

use argtree_metadata::{CommandSummary, OptionSummary, ValueExpectation};

use crate::error::Error;
use crate::option::Opt;

/// Renders a [`CommandSummary`] as clap-style help text.
#[derive(Debug, Clone, Copy)]
pub struct HelpFormatter {
    prefix: char,
}

impl HelpFormatter {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    /// Single-character aliases get one prefix, longer ones two.
    pub fn format_alias(&self, alias: &str) -> String {
        let p = self.prefix;
        if alias.chars().count() == 1 {
            format!("{p}{alias}")
        } else {
            format!("{p}{p}{alias}")
        }
    }

    fn option_left(&self, opt: &OptionSummary) -> String {
        let names = opt
            .aliases
            .iter()
            .map(|a| self.format_alias(a))
            .collect::<Vec<_>>()
            .join(", ");
        let value_name = opt
            .value_type
            .as_deref()
            .unwrap_or("value")
            .to_ascii_uppercase();
        match opt.value {
            ValueExpectation::Required => format!("{names} <{value_name}>"),
            ValueExpectation::Optional => format!("{names} [<{value_name}>]"),
            ValueExpectation::NotRequired => names,
        }
    }

    /// Render help for `cmd`; `title` is how the command is invoked
    /// (`app`, `app deploy`).
    pub fn render(&self, title: &str, cmd: &CommandSummary) -> String {
        let mut out = String::new();
        if cmd.description.trim().is_empty() {
            out.push_str(title);
            out.push('\n');
        } else {
            out.push_str(&format!("{} - {}\n", title, cmd.description.trim()));
        }

        let mut usage = format!("\nUsage: {title}");
        if !cmd.options.is_empty() {
            usage.push_str(" [OPTIONS]");
        }
        if !cmd.commands.is_empty() {
            usage.push_str(" <COMMAND>");
        }
        for arg in &cmd.arguments {
            usage.push_str(&format!(" <{}>", arg.name));
        }
        out.push_str(&usage);
        out.push('\n');

        push_table(
            &mut out,
            "Options",
            cmd.options
                .iter()
                .map(|o| (self.option_left(o), o.description.trim().to_string()))
                .collect(),
        );
        push_table(
            &mut out,
            "Arguments",
            cmd.arguments
                .iter()
                .map(|a| (format!("<{}>", a.name), a.description.trim().to_string()))
                .collect(),
        );
        push_table(
            &mut out,
            "Commands",
            cmd.commands
                .iter()
                .map(|c| (c.name.clone(), c.description.trim().to_string()))
                .collect(),
        );

        out
    }
}

fn push_table(out: &mut String, title: &str, rows: Vec<(String, String)>) {
    if rows.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
}

/// Render a version line.
pub fn version_text(app: &str, version: &str) -> String {
    if version.trim().is_empty() {
        format!("{app}\n")
    } else {
        format!("{} {}\n", app, version.trim())
    }
}

fn write_stdout(text: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()
}

impl<'a> Opt<'a> {
    /// `-h/--help`, printing to stdout.
    pub fn help() -> Self {
        Self::help_with(write_stdout)
    }

    /// `-h/--help [COMMAND]`, handing the rendered text to `sink`.
    ///
    /// Without a value, help for the active command is rendered; with one,
    /// help for that subcommand of the active command.
    pub fn help_with<W>(sink: W) -> Self
    where
        W: Fn(&str) -> io::Result<()> + 'a,
    {
        Self::flag(["h", "help"], "Print help", move |value, cntx| {
            let formatter = HelpFormatter::new(cntx.parser().prefix());
            let current = cntx.command_name();
            let text = match value {
                None => formatter.render(current, &cntx.command().summary(current)),
                Some(name) => {
                    let child = cntx
                        .command()
                        .subcommand(name)
                        .ok_or_else(|| Error::UnknownCommand {
                            name: name.to_string(),
                        })?;
                    formatter.render(&format!("{current} {name}"), &child.summary(name))
                }
            };
            sink(&text)?;
            Ok(())
        })
    }

    /// `-v/--version`, printing to stdout.
    pub fn version(app: impl Into<String>, version: impl Into<String>) -> Self {
        Self::version_with(app, version, write_stdout)
    }

    pub fn version_with<W>(app: impl Into<String>, version: impl Into<String>, sink: W) -> Self
    where
        W: Fn(&str) -> io::Result<()> + 'a,
    {
        let text = version_text(&app.into(), &version.into());
        Self::flag(["v", "version"], "Print version", move |_, _| {
            sink(&text)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argtree_metadata::ArgumentSummary;

    fn summary() -> CommandSummary {
        CommandSummary {
            name: "app".to_string(),
            description: "Ship things".to_string(),
            options: vec![
                OptionSummary {
                    aliases: vec!["h".to_string(), "help".to_string()],
                    description: "Print help".to_string(),
                    value: ValueExpectation::NotRequired,
                    value_type: None,
                },
                OptionSummary {
                    aliases: vec!["port".to_string()],
                    description: "Port to bind".to_string(),
                    value: ValueExpectation::Required,
                    value_type: Some("uint16".to_string()),
                },
                OptionSummary {
                    aliases: vec!["f".to_string(), "force".to_string()],
                    description: String::new(),
                    value: ValueExpectation::Optional,
                    value_type: Some("bool".to_string()),
                },
            ],
            arguments: vec![ArgumentSummary {
                name: "target".to_string(),
                description: "Where to ship".to_string(),
                value_type: Some("string".to_string()),
            }],
            commands: vec![CommandSummary {
                name: "deploy".to_string(),
                description: "Deploy a build".to_string(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn help_lists_every_section() {
        let text = HelpFormatter::new('-').render("app", &summary());
        assert!(text.starts_with("app - Ship things\n"));
        assert!(text.contains("Usage: app [OPTIONS] <COMMAND> <target>"));
        assert!(text.contains("  -h, --help"));
        assert!(text.contains("  --port <UINT16>       Port to bind\n"));
        assert!(text.contains("  -f, --force [<BOOL>]\n"));
        assert!(text.contains("\nArguments:\n  <target>  Where to ship\n"));
        assert!(text.contains("\nCommands:\n  deploy  Deploy a build\n"));
    }

    #[test]
    fn help_uses_configured_prefix() {
        let text = HelpFormatter::new('/').render("app", &summary());
        assert!(text.contains("/h, //help"));
        assert!(text.contains("//port <UINT16>"));
    }

    #[test]
    fn help_skips_empty_sections() {
        let cmd = CommandSummary {
            name: "bare".to_string(),
            ..Default::default()
        };
        let text = HelpFormatter::new('-').render("bare", &cmd);
        assert_eq!(text, "bare\n\nUsage: bare\n");
    }

    #[test]
    fn version_text_trims() {
        assert_eq!(version_text("app", " 1.2.3 "), "app 1.2.3\n");
        assert_eq!(version_text("app", ""), "app\n");
    }
}
