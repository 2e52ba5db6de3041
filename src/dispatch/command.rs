//! Delegated command assembly
//!
//! The command is kept as a token list until the spawn boundary; only
//! `to_shell_line` turns it into the string handed to the shell.

/// `<runner…> --target=<action> --projects=<a,b,…> <extra…>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegatedCommand {
  runner: Vec<String>,
  target: String,
  projects: Vec<String>,
  extra_args: Vec<String>,
}

impl DelegatedCommand {
  /// `runner` is split on whitespace (e.g. "npx nx run-many").
  ///
  /// Project order is kept as given and names are not deduplicated.
  pub fn new(runner: &str, target: &str, projects: &[String], extra_args: &[String]) -> Self {
    Self {
      runner: runner.split_whitespace().map(String::from).collect(),
      target: target.to_string(),
      projects: projects.to_vec(),
      extra_args: extra_args.to_vec(),
    }
  }

  /// All tokens, in command-line order
  pub fn tokens(&self) -> Vec<String> {
    let mut tokens = self.runner.clone();
    tokens.push(format!("--target={}", self.target));
    tokens.push(format!("--projects={}", self.projects.join(",")));
    tokens.extend(self.extra_args.iter().cloned());
    tokens
  }

  /// Single line for `sh -c`.
  ///
  /// Tokens are joined verbatim so forwarded flags keep their shell meaning.
  pub fn to_shell_line(&self) -> String {
    self.tokens().join(" ")
  }
}
