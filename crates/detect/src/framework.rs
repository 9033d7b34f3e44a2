use std::path::Path;

/// Content markers per framework, probed in a fixed order so detection is
/// deterministic when a file matches several.
const FRAMEWORK_PATTERNS: &[(&str, &[&str])] = &[
    (
        "react",
        &[
            "import React",
            "from 'react'",
            "from \"react\"",
            "React.Component",
            "extends Component",
            "useState",
            "useEffect",
            "createContext",
        ],
    ),
    (
        "angular",
        &[
            "@angular/core",
            "@Component",
            "@NgModule",
            "@Injectable",
            "platformBrowserDynamic",
        ],
    ),
    (
        "vue",
        &[
            "import Vue",
            "from 'vue'",
            "from \"vue\"",
            "new Vue",
            "createApp",
            "<template>",
            "Vue.component",
            "defineComponent",
        ],
    ),
    ("svelte", &["export let", "svelte:"]),
    (
        "nextjs",
        &[
            "GetServerSideProps",
            "GetStaticPaths",
            "GetStaticProps",
            "next/router",
            "next/link",
            "NextApiRequest",
            "NextApiResponse",
        ],
    ),
    (
        "flutter",
        &[
            "package:flutter",
            "extends StatelessWidget",
            "extends StatefulWidget",
            "BuildContext",
            "MaterialApp",
        ],
    ),
    (
        "reactnative",
        &["from 'react-native'", "StyleSheet.create", "AppRegistry"],
    ),
];

/// Determine the framework a file belongs to, if any. Only meaningful for
/// the JS/TS family and Dart; everything else returns None.
#[must_use]
pub fn detect_framework(file_path: &str, content: &str, language: &str) -> Option<&'static str> {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jsx" | "tsx" => return Some("react"),
        "vue" => return Some("vue"),
        "svelte" => return Some("svelte"),
        _ => {}
    }

    if !matches!(
        language,
        "javascript" | "typescript" | "jsx" | "tsx" | "dart"
    ) && !is_package_json(file_path)
    {
        return None;
    }

    if is_package_json(file_path) {
        return from_package_json(content);
    }

    for (framework, patterns) in FRAMEWORK_PATTERNS {
        if patterns.iter().any(|pattern| content.contains(pattern)) {
            return Some(framework);
        }
    }

    None
}

fn is_package_json(file_path: &str) -> bool {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case("package.json"))
}

/// Probe declared dependencies. react-native is checked before react so the
/// broader name does not shadow it.
fn from_package_json(content: &str) -> Option<&'static str> {
    if content.contains("\"react-native\"") {
        return Some("reactnative");
    }
    if content.contains("\"react\"") {
        return Some("react");
    }
    if content.contains("\"@angular/core\"") {
        return Some("angular");
    }
    if content.contains("\"vue\"") {
        return Some("vue");
    }
    if content.contains("\"svelte\"") {
        return Some("svelte");
    }
    if content.contains("\"next\"") {
        return Some("nextjs");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tsx_extension_is_react() {
        assert_eq!(detect_framework("App.tsx", "", "tsx"), Some("react"));
        assert_eq!(detect_framework("widget.vue", "", "vue"), Some("vue"));
    }

    #[test]
    fn content_patterns_classify_js() {
        let content = "import React from 'react';\nexport const App = () => null;";
        assert_eq!(detect_framework("app.js", content, "javascript"), Some("react"));

        let angular = "import { Component } from '@angular/core';";
        assert_eq!(
            detect_framework("cmp.ts", angular, "typescript"),
            Some("angular")
        );
    }

    #[test]
    fn non_js_languages_are_skipped() {
        assert_eq!(detect_framework("main.go", "useState", "go"), None);
        assert_eq!(detect_framework("lib.rs", "useEffect", "rust"), None);
    }

    #[test]
    fn package_json_dependencies_win() {
        let manifest = r#"{"dependencies": {"react-native": "0.74.0", "react": "18.0.0"}}"#;
        assert_eq!(
            detect_framework("package.json", manifest, "json"),
            Some("reactnative")
        );
    }

    #[test]
    fn plain_typescript_has_no_framework() {
        assert_eq!(
            detect_framework("util.ts", "export const n = 1;", "typescript"),
            None
        );
    }
}
