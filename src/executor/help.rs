//! Help text for shell commands

/// Help for a topic, or the general overview
pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        Some("cd") => "cd <address>\n  \
            Select the resource whose attributes are completed.\n  \
            Accepts absolute (/subsystem=web), relative (connector=http) and '..' targets."
            .to_string(),
        Some("writable") => "writable on|off\n  \
            Hide or show read-only attributes in completion."
            .to_string(),
        Some("reload") => "reload\n  \
            Forget cached attribute descriptions and re-read them on next use."
            .to_string(),
        Some("paths") | Some("path") => "Attribute paths\n  \
            name ('.' name | '[' index ']')*, e.g. socket.port or servers[0].name\n  \
            Press Tab to complete; enter a path to describe the attribute."
            .to_string(),
        Some(other) => format!("No help for '{}'. Try: help", other),
        None => "Commands:\n  \
            <attribute path>   Describe an attribute (Tab completes)\n  \
            cd <address>       Change the current resource address\n  \
            writable on|off    Toggle writable-only completion\n  \
            reload             Drop cached attribute descriptions\n  \
            help [topic]       Show help (topics: cd, writable, reload, paths)\n  \
            exit | quit        Leave the shell"
            .to_string(),
    }
}
