use super::ConfigError;

/// Looks up the value behind a `${...}` reference.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Resolves `NAME` and `env:NAME` from the process environment and
/// `file:PATH` from the trimmed contents of a file.
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        match reference.trim().split_once(':') {
            Some(("file", path)) => {
                let path = path.trim();
                std::fs::read_to_string(path)
                    .map(|contents| contents.trim().to_owned())
                    .map_err(|err| ConfigError::Load(format!("secret file {path}: {err}")))
            }
            Some(("env", name)) => env_var(name.trim()),
            _ => env_var(reference.trim()),
        }
    }
}

fn env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::NotFound(name.to_owned()))
}

/// Replace every `${...}` in `text`. Resolved values are not rescanned.
pub fn expand(text: &str, resolver: &dyn SecretResolver) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, after)) = rest.split_once("${") {
        let Some((reference, tail)) = after.split_once('}') else {
            return Err(ConfigError::Load(format!("unterminated placeholder in '{text}'")));
        };
        out.push_str(before);
        out.push_str(&resolver.resolve(reference)?);
        rest = tail;
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl SecretResolver for Echo {
        fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
            Ok(format!("<{reference}>"))
        }
    }

    #[test]
    fn expands_each_placeholder_once() {
        let out = expand("mysql://${USER}:${env:PASS}@db/${NAME}", &Echo).unwrap();
        assert_eq!(out, "mysql://<USER>:<env:PASS>@db/<NAME>");
    }

    #[test]
    fn resolved_text_is_not_rescanned() {
        struct Nested;
        impl SecretResolver for Nested {
            fn resolve(&self, _: &str) -> Result<String, ConfigError> {
                Ok("${AGAIN}".to_owned())
            }
        }
        assert_eq!(expand("x=${A}", &Nested).unwrap(), "x=${AGAIN}");
    }

    #[test]
    fn unterminated_placeholder_fails() {
        assert!(matches!(expand("${UNCLOSED", &Echo), Err(ConfigError::Load(_))));
    }

    #[test]
    fn reads_environment() {
        std::env::set_var("ASKQL_PLACEHOLDER_HOST", "10.10.0.9");
        let out = expand("mysql://${env:ASKQL_PLACEHOLDER_HOST}:3306/MIS", &DefaultSecretResolver)
            .unwrap();
        assert_eq!(out, "mysql://10.10.0.9:3306/MIS");
        std::env::remove_var("ASKQL_PLACEHOLDER_HOST");
    }

    #[test]
    fn unset_variable_is_not_found() {
        let err = DefaultSecretResolver.resolve("ASKQL_PLACEHOLDER_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(name) if name == "ASKQL_PLACEHOLDER_UNSET"));
    }

    #[test]
    fn reads_trimmed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gemini.key");
        std::fs::write(&path, "AIza-test\n").unwrap();
        let out = expand(&format!("${{file:{}}}", path.display()), &DefaultSecretResolver).unwrap();
        assert_eq!(out, "AIza-test");
    }
}
