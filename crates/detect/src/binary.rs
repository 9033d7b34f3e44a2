use std::path::Path;

/// Extensions that mark a file as binary, skipped before dispatch.
#[must_use]
pub fn is_binary_path(file_path: &Path) -> bool {
    let Some(extension) = file_path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    matches!(
        extension.to_lowercase().as_str(),
        "exe" | "dll"
            | "so"
            | "dylib"
            | "bin"
            | "obj"
            | "o"
            | "a"
            | "lib"
            | "png"
            | "jpg"
            | "jpeg"
            | "gif"
            | "bmp"
            | "tiff"
            | "ico"
            | "zip"
            | "tar"
            | "gz"
            | "bz2"
            | "7z"
            | "rar"
            | "pdf"
            | "doc"
            | "docx"
            | "xls"
            | "xlsx"
            | "ppt"
            | "pptx"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_binary_extensions_match() {
        assert!(is_binary_path(Path::new("logo.PNG")));
        assert!(is_binary_path(Path::new("dist/app.exe")));
        assert!(is_binary_path(Path::new("lib/native.so")));
    }

    #[test]
    fn text_files_pass_through() {
        assert!(!is_binary_path(Path::new("main.go")));
        assert!(!is_binary_path(Path::new("Dockerfile")));
        assert!(!is_binary_path(Path::new("README")));
    }
}
