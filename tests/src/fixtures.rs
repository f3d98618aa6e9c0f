//! Source files scenarios start from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ScenarioError, ScenarioResult};

/// An Eloquent-style model with an import, a collection field, two typed
/// fields and one routine.
pub const TEST_CLASS: &str = r#"<?php

namespace App\Models;

use Illuminate\Foundation\Auth\User as Authenticatable;

class TestClass extends Authenticatable
{
    protected $fillable = [
        "name",
        "email",
    ];

    protected int $id = 1;
    protected string $name = "test";

    public function getName()
    {
        return $this->name;
    }
}
"#;

/// A strict-types class outside any namespace.
pub const PLAIN_CLASS: &str = r#"<?php

declare(strict_types=1);

final class Invoice
{
    public const CURRENCY = 'EUR';

    private array $lines = [];

    public function total(): int
    {
        return array_sum($this->lines);
    }
}
"#;

/// A source with no class declaration.
pub const NO_CLASS: &str = "<?php\n\nfunction helper()\n{\n    return 1;\n}\n";

/// Look up a fixture by name.
pub fn source(name: &str) -> Option<&'static str> {
    match name {
        "test_class" => Some(TEST_CLASS),
        "plain_class" => Some(PLAIN_CLASS),
        "no_class" => Some(NO_CLASS),
        _ => None,
    }
}

/// File name a fixture is written under.
pub fn file_name(name: &str) -> String {
    let stem: String = name
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    format!("{}.php", stem)
}

/// Write a fixture into `dir` and return its path.
pub fn write(dir: &Path, name: &str) -> ScenarioResult<PathBuf> {
    let text = source(name).ok_or_else(|| ScenarioError::fixture_not_found(name))?;
    let path = dir.join(file_name(name));
    fs::write(&path, text).map_err(|e| ScenarioError::fixture_write(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("test_class"), "TestClass.php");
        assert_eq!(file_name("no_class"), "NoClass.php");
    }

    #[test]
    fn test_write_unknown_fixture() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            write(dir.path(), "missing"),
            Err(ScenarioError::FixtureNotFound { .. })
        ));
    }
}
