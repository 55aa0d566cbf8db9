//! Shell completion generation for attrsh
//!
//! This module generates shell completion scripts for bash, zsh and fish.
//! On top of the clap-generated script, `-a/--address` values are completed
//! from the resource addresses in the schema snapshot named on the command line.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{AttrshError, ConfigError, Result};

/// Generate shell completion script
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    print!("{}", completion_script(shell)?);
    Ok(())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(AttrshError::Config(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish",
            shell_name
        )))),
    }
}

/// Full completion script: the clap-generated base plus address completion
fn completion_script(shell: Shell) -> Result<String> {
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, "attrsh", &mut buffer);
    let base = String::from_utf8_lossy(&buffer);

    let extension = match shell {
        Shell::Bash => BASH_ADDRESSES,
        Shell::Zsh => ZSH_ADDRESSES,
        Shell::Fish => FISH_ADDRESSES,
        _ => {
            return Err(AttrshError::Config(ConfigError::Generic(
                "Unsupported shell. Supported shells: bash, zsh, fish".to_string(),
            )));
        }
    };

    Ok(format!("{}\n{}", base, extension))
}

const BASH_ADDRESSES: &str = r#"
# Resource addresses from the schema snapshot given on the command line
_attrsh_list_addresses() {
    local word
    for word in "${COMP_WORDS[@]:1}"; do
        if [[ -f "$word" ]]; then
            attrsh "$word" addresses 2>/dev/null
            return
        fi
    done
}

_attrsh_enhanced() {
    local cur prev words cword
    _init_completion || return

    if [[ "$prev" == "-a" || "$prev" == "--address" ]]; then
        COMPREPLY=($(compgen -W "$(_attrsh_list_addresses)" -- "$cur"))
        return 0
    fi

    # Fall back to default completion
    _attrsh "$@"
}

complete -F _attrsh_enhanced attrsh
"#;

const ZSH_ADDRESSES: &str = r#"
# Resource addresses from the schema snapshot given on the command line
_attrsh_addresses() {
    local -a addresses
    local word
    for word in ${words[2,-1]}; do
        if [[ -f "$word" ]]; then
            addresses=(${(f)"$(attrsh "$word" addresses 2>/dev/null)"})
            break
        fi
    done
    compadd -a addresses
}

_attrsh_enhanced() {
    if [[ ${words[CURRENT-1]} == "-a" || ${words[CURRENT-1]} == "--address" ]]; then
        _attrsh_addresses
        return 0
    fi

    _attrsh "$@"
}

compdef _attrsh_enhanced attrsh
"#;

const FISH_ADDRESSES: &str = r#"
# Resource addresses from the schema snapshot given on the command line
function __attrsh_list_addresses
    for word in (commandline -opc)[2..-1]
        if test -f "$word"
            attrsh "$word" addresses 2>/dev/null
            return
        end
    end
end

complete -c attrsh -s a -l address -f -a "(__attrsh_list_addresses)" -d "Resource address from the schema snapshot"
"#;
