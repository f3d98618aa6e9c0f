//! End-to-end edit scenarios over the fixture classes.

use sculptor_tests::prelude::*;

mod model_fields {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("model_fields").step(
            "retype_default_and_add_getter",
            |s| {
                s.change_field("id", None, None, Some("string"))
                    .change_field("name", Some("Anonymous".into()), None, None)
                    .add_routine("getId", vec![], "return $this->id;", "public", false);
            },
            |a| {
                a.applied(3).exactly(
                    r#"<?php

namespace App\Models;

use Illuminate\Foundation\Auth\User as Authenticatable;

class TestClass extends Authenticatable
{
    protected $fillable = [
        "name",
        "email",
    ];

    protected string $id = 1;
    protected string $name = 'Anonymous';

    public function getName()
    {
        return $this->name;
    }

    public function getId()
    {
        return $this->id;
    }
}
"#,
                )
            },
        )
    }

    #[test]
    fn test_change_fields_and_add_routine() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod mixins {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mixins")
            .step(
                "add_same_mixin_twice",
                |s| {
                    s.add_mixin("HasTeams").add_mixin("HasTeams");
                },
                |a| a.applied(1).duplicates(1).occurs("use HasTeams;", 1),
            )
            .step(
                "add_again_later",
                |s| {
                    s.add_mixin("\\HasTeams");
                },
                |a| a.duplicates(1).occurs("HasTeams", 1),
            )
            .step(
                "add_second_and_remove_first",
                |s| {
                    s.add_mixin("HasPermissions").remove_mixin("HasTeams").remove_mixin("HasTeams");
                },
                |a| {
                    a.applied(2)
                        .not_found(1)
                        .contains("{\n    use HasPermissions;\n\n    protected $fillable")
                        .absent("HasTeams")
                },
            )
    }

    #[test]
    fn test_mixin_lifecycle() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod complete_transformation {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("complete_transformation").step(
            "transform",
            |s| {
                s.add_import("Malico\\Teams\\HasTeams", None)
                    .add_import("Malico\\Permissions\\HasPermissions", None)
                    .add_import("\\Carbon\\Carbon", None)
                    .add_mixin("HasTeams")
                    .add_mixin("HasPermissions")
                    .change_field_type("id", "string")
                    .change_field_default("name", "Anonymous User")
                    .change_field_visibility("name", "public")
                    .add_field("teamRole", Some("member".into()), "protected", Some("string"))
                    .add_field("permissions", Some(vec!["read"].into()), "protected", Some("array"))
                    .add_field("lastLoginAt", Some(Value::Null), "protected", Some("?Carbon\\Carbon"))
                    .add_field("isActive", Some(true.into()), "public", Some("bool"))
                    .extend_collection_field(
                        "fillable",
                        vec!["team_id", "team_role", "last_login_at", "is_active"],
                    )
                    .add_routine("getTeamRole", vec![], "return $this->teamRole;", "public", false)
                    .add_routine(
                        "setTeamRole",
                        vec![ParamSpec::typed("role", "string")],
                        "$this->teamRole = $role; return $this;",
                        "public",
                        false,
                    )
                    .add_routine(
                        "hasPermission",
                        vec![ParamSpec::typed("permission", "string")],
                        "return in_array($permission, $this->permissions);",
                        "public",
                        false,
                    )
                    .add_routine("getName", vec![], "return $this->name ?: \"Guest User\";", "public", true);
            },
            |a| {
                a.applied(17)
                    .contains("use Malico\\Teams\\HasTeams;\n")
                    .contains("use Malico\\Permissions\\HasPermissions;\n")
                    .contains("use Carbon\\Carbon;\n")
                    .contains("    use HasTeams;\n    use HasPermissions;\n")
                    .contains("protected string $id = 1;")
                    .contains("public string $name = 'Anonymous User';")
                    .contains("protected string $teamRole = 'member';")
                    .contains("protected array $permissions = ['read'];")
                    .contains("protected ?Carbon\\Carbon $lastLoginAt = null;")
                    .contains("public bool $isActive = true;")
                    .contains("        'is_active',\n    ];")
                    .contains("public function setTeamRole(string $role)\n    {\n        $this->teamRole = $role;\n        return $this;\n    }")
                    .contains("public function hasPermission(string $permission)")
                    .contains("return $this->name ?: \"Guest User\";")
                    .absent("return $this->name;")
            },
        )
    }

    #[test]
    fn test_complete_class_transformation() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod missing_targets {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("missing_targets").step(
            "edit_what_is_not_there",
            |s| {
                s.add_mixin("NonExistentTrait")
                    .remove_field("nonExistentProperty")
                    .change_field_type("nonExistentProperty", "string")
                    .change_routine_body("nonExistentMethod", "return 1;")
                    .remove_constant("NOPE")
                    .remove_import("Foo\\Bar")
                    .change_constant("NOPE", Some(Value::Int(1)), None);
            },
            |a| {
                a.applied(1)
                    .not_found(6)
                    .contains("class TestClass extends Authenticatable")
                    .contains("use NonExistentTrait;")
            },
        )
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod routines {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("routines")
            .step(
                "add_with_defaults",
                |s| {
                    s.add_routine(
                        "scopeActive",
                        vec![
                            ParamSpec::typed("query", "\\Illuminate\\Database\\Eloquent\\Builder"),
                            ParamSpec::new("$flag").with_default(true),
                        ],
                        "return $query->where('is_active', $flag);",
                        "public",
                        false,
                    );
                },
                |a| {
                    a.applied(1).contains(
                        "public function scopeActive(\\Illuminate\\Database\\Eloquent\\Builder $query, $flag = true)",
                    )
                },
            )
            .step(
                "narrow_and_rewrite",
                |s| {
                    s.change_routine_visibility("scopeactive", "protected")
                        .change_routine_body("getName", "return ucfirst($this->name);");
                },
                |a| {
                    a.applied(2)
                        .contains("protected function scopeActive(")
                        .contains("        return ucfirst($this->name);\n")
                },
            )
            .step(
                "broken_body",
                |s| {
                    s.change_routine("getName", None, Some("invalid php code {{{"), None);
                },
                |a| a.applied(1).contains("throw new \\Exception('Method body parsing failed');"),
            )
            .step(
                "remove",
                |s| {
                    s.remove_routine("GETNAME");
                },
                |a| a.applied(1).absent("getName"),
            )
    }

    #[test]
    fn test_routine_lifecycle() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod constants {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("constants")
            .fixture("plain_class")
            .step(
                "add_and_change",
                |s| {
                    s.add_constant("RATE", 0.2, "protected")
                        .change_constant("CURRENCY", Some("USD".into()), Some("private"));
                },
                |a| {
                    a.applied(2)
                        .contains("{\n    protected const RATE = 0.2;\n    private const CURRENCY = 'USD';\n\n    private array $lines")
                }
            )
            .step(
                "remove",
                |s| {
                    s.remove_constant("RATE").remove_constant("CURRENCY");
                },
                |a| a.applied(2).absent("const"),
            )
    }

    #[test]
    fn test_constant_lifecycle() {
        init_test_logging();
        scenario().run().unwrap();
    }
}

mod class_and_namespace {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("class_and_namespace")
            .fixture("plain_class")
            .step(
                "no_namespace_yet",
                |s| {
                    s.change_namespace("Billing");
                },
                |a| a.not_found(1).absent("namespace"),
            )
            .step(
                "add_namespace_and_import",
                |s| {
                    s.add_namespace("App\\Billing")
                        .add_namespace("App\\Other")
                        .add_import("App\\Contracts\\Payable", None);
                },
                |a| {
                    a.applied(2).duplicates(1).contains(
                        "declare(strict_types=1);\n\nnamespace App\\Billing;\n\nuse App\\Contracts\\Payable;\n\nfinal class Invoice\n",
                    )
                },
            )
            .step(
                "rename_extend_implement",
                |s| {
                    s.change_namespace("Domain\\Billing")
                        .change_class_name("Receipt")
                        .extend_class("Document")
                        .implement_interface("Payable")
                        .implement_interface("\\Payable");
                },
                |a| {
                    a.applied(4)
                        .duplicates(1)
                        .contains("namespace Domain\\Billing;\n")
                        .contains("final class Receipt extends Document implements Payable\n")
                }
            )
    }

    #[test]
    fn test_class_and_namespace_edits() {
        init_test_logging();
        scenario().run().unwrap();
    }

    #[test]
    fn test_rename_without_class() {
        init_test_logging();
        Scenario::new("no_class")
            .fixture("no_class")
            .step(
                "rename",
                |s| {
                    s.change_class_name("Anything").add_mixin("HasTeams");
                },
                |a| a.applied(0).not_found(2),
            )
            .run()
            .unwrap();
    }
}

mod extension {
    use super::*;
    use sculptor_mutation::{Mutation, Operation, OperationKind};

    pub fn scenario() -> Scenario {
        Scenario::new("extension")
            .step(
                "unknown_kind",
                |s| {
                    s.add_mixin("HasTeams").enqueue("add_widget", params!()).add_mixin("Notifiable");
                },
                |a| a.error("Unknown operation: add_widget"),
            )
            .step(
                "applied_before_failure_stays",
                |_| {},
                |a| a.applied(0).contains("use HasTeams;").absent("Notifiable"),
            )
            .step(
                "bad_parameter",
                |s| {
                    s.enqueue("add_field", params! { "default" => 1 });
                },
                |a| a.error("Invalid parameter 'name'"),
            )
            .step(
                "unknown_visibility_word",
                |s| {
                    s.change_field_visibility("id", "internal");
                },
                |a| a.error("Invalid parameter 'visibility'"),
            )
            .step(
                "registered_kind",
                |s| {
                    s.registry_mut().register("add_soft_deletes", |_args: Vec<Value>| {
                        let params = params! { "mixin" => "SoftDeletes" };
                        Ok(Box::new(Operation::build(OperationKind::AddMixin, &params)?) as Box<dyn Mutation>)
                    });
                    s.add_registered("add_soft_deletes", params!());
                },
                |a| a.applied(1).contains("    use HasTeams;\n    use SoftDeletes;\n"),
            )
    }

    #[test]
    fn test_custom_and_failing_kinds() {
        init_test_logging();
        scenario().run().unwrap();
    }
}
