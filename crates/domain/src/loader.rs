use std::path::Path;

use tracing::debug;

use crate::schema::Domain;

/// Load a domain from a YAML file.
pub fn load_domain(path: &Path) -> anyhow::Result<Domain> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let domain: Domain = serde_yaml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    debug!(
        path = %path.display(),
        slots = domain.slots.len(),
        templates = domain.templates.len(),
        "loaded domain"
    );
    Ok(domain)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_domain(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_domain_from_file() {
        let file = write_domain(
            r#"
slots:
  name:
    type: text
templates:
  utter_greet:
    - text: "hey {name}!"
    - text: "hello!"
"#,
        );
        let domain = load_domain(file.path()).unwrap();
        assert_eq!(domain.templates["utter_greet"].len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_domain(Path::new("/nonexistent/domain.yml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let file = write_domain("templates: [not: {a: map");
        let err = load_domain(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
