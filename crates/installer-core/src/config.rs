//! The product's module tree and install-time constants
//!
//! Everything the installer can customize is declared here: two always-asked
//! variables naming the microservice, then one toggle per optional feature.
//! Copy tasks and package requirements ride along as opaque side effects for
//! the copier and the package installer.

use crate::modules::rule::Rule;
use crate::modules::{
    CopyTask, Module, ModuleNode, ModuleTree, PackageSpec, SideEffects, TreeError, Variable,
};

/// Node names the plumbing refers back to
pub const MS_NAME: &str = "ms-name";
pub const MS_DESCRIPTION: &str = "ms-description";
pub const API_MODULE: &str = "api";

/// Directory/file names skipped wholesale when walking the target tree
pub const IGNORE_NAMES: &[&str] = &["node_modules", ".git"];

/// Files shipped without their leading dot so the template itself stays
/// innocuous, renamed into place after copying
pub const DOT_FILES: &[&str] = &["gitignore", "eslintrc.json"];

/// The API handler file that picks up the microservice name on rename
pub const API_HANDLER: &str = "src/handlers/ms-api.ts";

/// npm invocations run for every install, before any per-module packages
pub const BASE_NPM_ARGS: &[&[&str]] = &[
    &["install"],
    &["install", "@msoffredi/ms-common"],
    &["install", "--save-dev", "@types/aws-lambda"],
    &["install", "--save-dev", "@types/jest"],
    &["install", "--save-dev", "@types/node@18"],
    &["install", "--save-dev", "jest"],
    &["install", "--save-dev", "ts-jest"],
    &["install", "--save-dev", "ts-node"],
    &["install", "--save-dev", "typescript"],
    &["install", "--save-dev", "eslint"],
    &["install", "--save-dev", "@typescript-eslint/eslint-plugin"],
    &["install", "--save-dev", "@typescript-eslint/parser"],
    &["install", "--save-dev", "aws-sdk-client-mock"],
];

/// Assemble the full module tree, in the order the user is asked
pub fn module_tree() -> Result<ModuleTree, TreeError> {
    let use_domain_deps = ModuleTree::new(vec![
        (
            "domain-name",
            ModuleNode::Variable(Variable::new(
                "Provide a domain name",
                Rule::new("Invalid domain name").pattern(
                    r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]",
                ),
            )),
        ),
        (
            "certificate-arn",
            ModuleNode::Variable(Variable::new(
                "SSL certificate ARN for the domain provided",
                Rule::new("Invalid certificate ARN").pattern(
                    r"^arn:aws:acm:\w+(?:-\w+)+:\d{12}:certificate/[A-Za-z0-9]+(?:-[A-Za-z0-9]+)+$",
                ),
            )),
        ),
    ])?;

    let api_deps = ModuleTree::new(vec![(
        "use-domain",
        ModuleNode::Module(
            Module::new(
                "Do you want to configure a domain name? \
                 [The domain must already exist in Route 53] (y/N)?",
            )
            .dependencies(use_domain_deps),
        ),
    )])?;

    let s3_deps = ModuleTree::new(vec![(
        "bucket-name",
        ModuleNode::Variable(Variable::new(
            "Provide a bucket name (a-z0-9-.)",
            Rule::new("Invalid bucket name")
                .length(3, 63)
                .pattern(r"^[a-z0-9][a-z0-9.-]+[a-z0-9]$"),
        )),
    )])?;

    let ddb_deps = ModuleTree::new(vec![(
        "ddb-table-name",
        ModuleNode::Variable(Variable::new(
            "Provide a DynamoDB table name (a-zA-Z0-9-_.)",
            Rule::new("Invalid DynamoDB table name")
                .length(3, 255)
                .pattern(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*[a-zA-Z0-9]$"),
        )),
    )])?;

    ModuleTree::new(vec![
        (
            MS_NAME,
            ModuleNode::Variable(
                Variable::new(
                    "Provide a microservice name (a-zA-Z0-9-)",
                    Rule::new("Invalid microservice name")
                        .length(3, 64)
                        .pattern(r"^[a-zA-Z][a-zA-Z0-9-]+[a-zA-Z0-9]$"),
                )
                .side_effects(SideEffects {
                    copy_tasks: vec![
                        // Top-level template files; subdirectories follow below
                        CopyTask {
                            src: ".",
                            dest: ".",
                            recursive: false,
                        },
                        CopyTask {
                            src: "src/utils",
                            dest: "src/utils",
                            recursive: true,
                        },
                    ],
                    packages: vec![],
                }),
            ),
        ),
        (
            MS_DESCRIPTION,
            ModuleNode::Variable(Variable::new(
                "Provide a microservice description (128 chars max)",
                Rule::new("Invalid microservice description").length(10, 128),
            )),
        ),
        (
            API_MODULE,
            ModuleNode::Module(
                Module::new("Do you need a REST API (y/N)?")
                    .dependencies(api_deps)
                    .side_effects(SideEffects {
                        copy_tasks: vec![
                            CopyTask {
                                src: API_HANDLER,
                                dest: API_HANDLER,
                                recursive: false,
                            },
                            CopyTask {
                                src: "src/route-handlers",
                                dest: "src/route-handlers",
                                recursive: true,
                            },
                        ],
                        packages: vec![],
                    }),
            ),
        ),
        (
            "s3",
            ModuleNode::Module(
                Module::new("Do you need an S3 bucket (y/N)?")
                    .dependencies(s3_deps)
                    .side_effects(SideEffects {
                        copy_tasks: vec![],
                        packages: vec![PackageSpec {
                            name: "@aws-sdk/client-s3",
                            dev: false,
                        }],
                    }),
            ),
        ),
        (
            "ddb",
            ModuleNode::Module(
                Module::new("Do you need a DynamoDB table (y/N)?")
                    .dependencies(ddb_deps)
                    .side_effects(SideEffects {
                        copy_tasks: vec![],
                        packages: vec![PackageSpec {
                            name: "@aws-sdk/client-dynamodb",
                            dev: false,
                        }],
                    }),
            ),
        ),
        (
            "events",
            ModuleNode::Module(Module::new("Do you need events support (y/N)?")),
        ),
    ])
}
