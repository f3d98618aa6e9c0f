//! Behavioural properties every edit sequence must hold.

use sculptor_tests::prelude::*;

fn session() -> Sculptor {
    init_test_logging();
    Sculptor::from_source(fixtures::TEST_CLASS).unwrap()
}

mod idempotence {
    use super::*;

    #[test]
    fn test_repeated_additions_change_nothing_after_the_first() {
        // GIVEN
        let mut once = session();
        once.add_mixin("HasTeams")
            .add_import("App\\Traits\\HasTeams", None)
            .add_field("teamId", Some(Value::Int(1)), "protected", Some("int"))
            .add_constant("ROLE", "member", "public")
            .add_routine("getTeamId", vec![], "return $this->teamId;", "public", false);
        let expected = once.render().unwrap();

        let mut twice = session();
        for _ in 0..2 {
            twice
                .add_mixin("HasTeams")
                .add_import("App\\Traits\\HasTeams", None)
                .add_field("teamId", Some(Value::Int(1)), "protected", Some("int"))
                .add_constant("ROLE", "member", "public")
                .add_routine("getTeamId", vec![], "return $this->teamId;", "public", false);
        }

        // WHEN
        let reports = twice.apply_pending().unwrap();

        // THEN
        assert_eq!(twice.render().unwrap(), expected);
        let skipped = reports.iter().filter(|r| !r.is_applied()).count();
        assert_eq!(skipped, 5);
    }

    #[test]
    fn test_duplicate_field_with_other_default_is_dropped() {
        Scenario::new("duplicate_field")
            .step(
                "add_twice",
                |s| {
                    s.add_field("existingProperty", Some("value1".into()), "public", Some("string"))
                        .add_field("existingProperty", Some("value2".into()), "private", Some("int"));
                },
                |a| {
                    a.applied(1)
                        .duplicates(1)
                        .contains("public string $existingProperty = 'value1';")
                        .absent("value2")
                },
            )
            .run()
            .unwrap();
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_edits_apply_in_call_order() {
        // GIVEN
        let mut sculptor = session();

        // WHEN
        sculptor
            .add_field("status", Some("draft".into()), "protected", None)
            .change_field_default("status", "published")
            .remove_field("status")
            .add_field("status", Some("archived".into()), "protected", None);
        let output = sculptor.render().unwrap();

        // THEN
        assert!(output.contains("protected $status = 'archived';"));
        assert!(!output.contains("published"));
    }

    #[test]
    fn test_routines_append_in_call_order() {
        let mut sculptor = session();
        sculptor
            .add_routine("activate", vec![], "$this->active = true;", "public", false)
            .add_routine("deactivate", vec![], "$this->active = false;", "public", false);
        let output = sculptor.render().unwrap();

        let get_name = output.find("function getName()").unwrap();
        let activate = output.find("function activate()").unwrap();
        let deactivate = output.find("function deactivate()").unwrap();
        assert!(get_name < activate && activate < deactivate);
    }

    #[test]
    fn test_new_members_land_in_their_category() {
        // GIVEN
        let mut sculptor = session();

        // WHEN
        sculptor
            .add_routine("getRole", vec![], "return $this->role;", "public", false)
            .add_field("role", Some("member".into()), "protected", Some("string"))
            .add_mixin("HasTeams")
            .add_constant("DEFAULT_ROLE", "member", "public");
        let output = sculptor.render().unwrap();

        // THEN
        let constant = output.find("const DEFAULT_ROLE").unwrap();
        let mixin = output.find("use HasTeams;").unwrap();
        let fillable = output.find("$fillable").unwrap();
        let field = output.find("$role =").unwrap();
        let get_name = output.find("function getName").unwrap();
        let get_role = output.find("function getRole").unwrap();
        assert!(constant < mixin);
        assert!(mixin < fillable);
        assert!(fillable < field && field < get_name);
        assert!(get_name < get_role);
        assert!(output.contains(
            "    protected string $name = \"test\";\n    protected string $role = 'member';\n"
        ));
    }
}

mod override_gate {
    use super::*;

    #[test]
    fn test_existing_routine_survives_without_override() {
        Scenario::new("no_override")
            .step(
                "add_existing",
                |s| {
                    s.add_routine("getName", vec![], "return \"test\";", "public", false);
                },
                |a| {
                    a.duplicates(1)
                        .contains("return $this->name;")
                        .absent("return \"test\";")
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_override_replaces_in_place() {
        Scenario::new("override")
            .step(
                "replace",
                |s| {
                    s.add_routine("getName", vec![], "return $this->name ?: \"Guest User\";", "public", true)
                        .add_routine("getEmail", vec![], "return $this->email;", "public", false);
                },
                |a| {
                    a.applied(2)
                        .occurs("function getName()", 1)
                        .contains("return $this->name ?: \"Guest User\";")
                        .absent("return $this->name;")
                        .matches(r"(?s)function getName\(\).*function getEmail\(\)")
                },
            )
            .run()
            .unwrap();
    }
}

mod collections {
    use super::*;

    #[test]
    fn test_positional_entries_merge_without_duplicates() {
        Scenario::new("extend_fillable")
            .step(
                "extend",
                |s| {
                    s.extend_collection_field("fillable", vec!["email", "team_id", "team_role"]);
                },
                |a| {
                    a.applied(1).contains(
                        "    protected $fillable = [\n        \"name\",\n        \"email\",\n        'team_id',\n        'team_role',\n    ];\n",
                    )
                },
            )
            .run()
            .unwrap();
    }

    #[test]
    fn test_keyed_entry_overwrites_only_its_own_value() {
        // GIVEN
        let mut sculptor = session();
        sculptor.add_field(
            "casts",
            Some(assoc! { "created_at" => "datetime", "flags" => "array", "score" => "float" }),
            "protected",
            Some("array"),
        );

        // WHEN
        sculptor.extend_collection_field("casts", assoc! { "flags" => "json", "verified_at" => "datetime" });
        let output = sculptor.render().unwrap();

        // THEN
        assert!(output.contains(
            "protected array $casts = ['created_at' => 'datetime', 'flags' => 'json', 'score' => 'float', 'verified_at' => 'datetime'];"
        ));
    }

    #[test]
    fn test_extending_a_scalar_default_replaces_it() {
        let mut sculptor = session();
        sculptor.extend_collection_field("name", vec!["a"]);
        let output = sculptor.render().unwrap();
        assert!(output.contains("protected string $name = ['a'];"));
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn test_unedited_source_renders_unchanged() {
        let mut sculptor = session();
        assert_eq!(sculptor.render().unwrap(), fixtures::TEST_CLASS);
    }

    #[test]
    fn test_string_literals_survive_unrelated_edits() {
        // GIVEN
        let source = "<?php\n\nclass Report\n{\n    public function query(): string\n    {\n        return \"SELECT *\nFROM users\n    WHERE id = 1\";\n    }\n\n    public function label() { return 'é'; }\n}\n";
        init_test_logging();
        let mut sculptor = Sculptor::from_source(source).unwrap();

        // WHEN
        sculptor
            .add_field("table", Some("users".into()), "protected", None)
            .add_routine("note", vec![], "return 'first\nsecond';", "public", false);
        let output = sculptor.render().unwrap();

        // THEN
        assert!(output.contains("        return \"SELECT *\nFROM users\n    WHERE id = 1\";\n"));
        assert!(output.contains("    public function label() { return 'é'; }\n"));
        assert!(output.contains("        return 'first\nsecond';\n"));
    }

    #[test]
    fn test_render_twice_returns_the_same_text() {
        // GIVEN
        let mut sculptor = session();
        sculptor
            .add_mixin("HasTeams")
            .change_field_type("id", "string");

        // WHEN
        let first = sculptor.render().unwrap();
        let second = sculptor.render().unwrap();

        // THEN
        assert_eq!(first, second);
        assert_eq!(sculptor.history().len(), 2);
    }
}
