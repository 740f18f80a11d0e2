//! Bundled default configuration documents.
//!
//! Hosts normally ship their own files; these keep the dispatch pipeline
//! usable when a document is missing.

/// Default `config` document.
pub const CONFIG: &str = r#"
name: concierge
prefix: "&8[&6Concierge&8]"
debug: false
general:
  # Maximum escape-expansion passes (%newline% / %nl%) per render.
  new-lines: 4
"#;

/// Default `messages` document.
pub const MESSAGES: &str = r#"
messages:
  prefix: "&8[&6Concierge&8]"
  command-doesnt-exist: "&cThat command does not exist."
  must-be-player: "&cYou must be a player to use &f%command%&c."
  no-permission: "&cYou do not have permission to do that."
  invalid-command: "&cInvalid command usage."
  invalid-command-correction: "&7Try &f%command%&7."
  help-header: "&6Commands available to %sender%:"
  help-entry: "&f%syntax% &7- %description%"
  about: "&6%name% &7v%version% running with &f%commands% &7commands."
commands:
  help:
    syntax: "/concierge help"
    description: "Lists the commands you can use."
  about:
    syntax: "/concierge about"
    description: "Shows information about this server."
"#;

/// Default `sounds` document.
pub const SOUNDS: &str = r#"
error:
  enabled: true
  sounds:
    1:
      sound: "BLOCK_NOTE_BLOCK_BASS"
      volume: 1.0
      pitch: 0.7
      delay: 0
"#;

/// Default `inventories` document.
pub const INVENTORIES: &str = r#"
help-item:
  title: "&6Help"
  material: "BOOK"
  lore:
    - "&7Click to list commands."
"#;

/// All bundled documents, keyed by logical name.
pub const DOCUMENTS: &[(&str, &str)] = &[
    ("config", CONFIG),
    ("messages", MESSAGES),
    ("sounds", SOUNDS),
    ("inventories", INVENTORIES),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_document;

    #[test]
    fn test_bundled_documents_parse() {
        for (name, content) in DOCUMENTS {
            let doc = parse_document(name, content);
            assert!(doc.is_ok(), "bundled document {} failed to parse", name);
        }
    }
}
