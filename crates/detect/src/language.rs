use std::path::Path;

/// Determine the language tag of a file from its path and content.
///
/// Order of checks: Dockerfile naming, shebang line, extension, special
/// filenames. Returns `"unknown"` when nothing matches; the generic chunker
/// handles those.
#[must_use]
pub fn detect_language(file_path: &str, content: &[u8]) -> &'static str {
    let base_name = Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .to_lowercase();

    if base_name == "dockerfile" || base_name.starts_with("dockerfile.") {
        return "dockerfile";
    }

    if let Some(language) = from_shebang(content) {
        return language;
    }

    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if let Some(language) = from_extension(&extension) {
        return language;
    }

    if let Some(language) = from_special_file(&base_name) {
        return language;
    }

    "unknown"
}

/// Classify by `#!` interpreter line. An unrecognized shebang still means a
/// script, so it falls back to shell.
fn from_shebang(content: &[u8]) -> Option<&'static str> {
    if content.len() < 3 || !content.starts_with(b"#!") {
        return None;
    }

    let first_line_end = content
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(content.len());
    let first_line = String::from_utf8_lossy(&content[..first_line_end]);

    if first_line.contains("/bin/bash")
        || first_line.contains("/bin/sh")
        || first_line.contains("/bin/zsh")
    {
        return Some("shell");
    }
    if first_line.contains("python") {
        return Some("python");
    }
    if first_line.contains("ruby") {
        return Some("ruby");
    }
    if first_line.contains("node") {
        return Some("javascript");
    }

    Some("shell")
}

fn from_extension(extension: &str) -> Option<&'static str> {
    let language = match extension {
        // Programming languages
        "go" => "go",
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" => "python",
        "rb" => "ruby",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "rs" => "rust",
        "php" => "php",
        "dart" => "dart",

        // Shell scripts and friends
        "sh" | "bash" | "zsh" | "fish" => "shell",
        "ps1" => "powershell",
        "bat" | "cmd" => "batch",

        // Web / markup
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "vue" => "vue",
        "svelte" => "svelte",

        // Data / config
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" | "markdown" => "markdown",
        "ini" => "ini",
        "conf" => "conf",
        "env" => "env",

        _ => return None,
    };
    Some(language)
}

fn from_special_file(base_name: &str) -> Option<&'static str> {
    let language = match base_name {
        "makefile" => "makefile",
        "jenkinsfile" => "jenkinsfile",
        "gemfile" | "rakefile" => "ruby",
        "cmakelists.txt" => "cmake",
        ".gitignore" => "gitignore",
        ".dockerignore" => "dockerignore",
        ".bashrc" | ".zshrc" | ".bash_profile" | ".profile" => "shell",
        _ => return None,
    };
    Some(language)
}
