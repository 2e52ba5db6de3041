//! Pass-through flag extraction
//!
//! Flags traf does not know are meant for the delegated task runner
//! (`traf affected test --parallel=3`). They are pulled out of argv before clap
//! sees it and re-serialized as `--key=value`:
//!
//! - `--key=value` → `--key=value`
//! - `--key value` → `--key=value` (when `value` does not start with `-`)
//! - `--key`       → `--key=true`
//!
//! Everything after a literal `--` is forwarded verbatim.
//! Which flags are "known" comes from the clap `Command` itself.

use std::collections::HashMap;
use std::ffi::OsString;

/// argv split into the part clap parses and the forwarded arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitArgs {
  pub clap_args: Vec<OsString>,
  pub forwarded: Vec<String>,
}

/// Long flags of `cmd` and its subcommands, mapped to "takes a value".
fn known_long_flags(cmd: &clap::Command) -> HashMap<String, bool> {
  let mut known = HashMap::from([("help".to_string(), false), ("version".to_string(), false)]);
  collect_long_flags(cmd, &mut known);
  known
}

fn collect_long_flags(cmd: &clap::Command, known: &mut HashMap<String, bool>) {
  for arg in cmd.get_arguments() {
    let takes_value = arg.get_action().takes_values();
    if let Some(long) = arg.get_long() {
      known.insert(long.to_string(), takes_value);
    }
    for alias in arg.get_aliases().unwrap_or_default() {
      known.insert(alias.to_string(), takes_value);
    }
  }

  for sub in cmd.get_subcommands() {
    collect_long_flags(sub, known);
  }
}

/// Split `args` (including the binary name) for clap and the delegated action.
pub fn split_args(cmd: &clap::Command, args: impl IntoIterator<Item = OsString>) -> SplitArgs {
  let known = known_long_flags(cmd);
  let mut clap_args = Vec::new();
  let mut forwarded = Vec::new();
  let mut raw = Vec::new();

  let mut iter = args.into_iter().peekable();

  while let Some(arg) = iter.next() {
    // Non-UTF-8 arguments can't be re-serialized; leave them to clap
    let Some(text) = arg.to_str() else {
      clap_args.push(arg);
      continue;
    };

    if text == "--" {
      raw.extend(iter.by_ref().map(|a| a.to_string_lossy().into_owned()));
      break;
    }

    let Some(body) = text.strip_prefix("--") else {
      clap_args.push(arg);
      continue;
    };

    let (key, inline_value) = match body.split_once('=') {
      Some((key, value)) => (key, Some(value.to_string())),
      None => (body, None),
    };

    if let Some(&takes_value) = known.get(key) {
      clap_args.push(arg.clone());
      if takes_value && inline_value.is_none()
        && let Some(value) = iter.next()
      {
        clap_args.push(value);
      }
      continue;
    }

    let value = match inline_value {
      Some(value) => value,
      None => match iter.peek().and_then(|next| next.to_str()) {
        Some(next) if !next.starts_with('-') => {
          let value = next.to_string();
          iter.next();
          value
        }
        _ => "true".to_string(),
      },
    };

    forwarded.push(format!("--{}={}", key, value));
  }

  forwarded.extend(raw);
  SplitArgs { clap_args, forwarded }
}
