// dupcloser platform paths for Linux
// Config: ~/.config/dupcloser

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for dupcloser on Linux.
/// Uses `$XDG_CONFIG_HOME/dupcloser` if set, otherwise `~/.config/dupcloser`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("dupcloser")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("dupcloser")
    }
}
