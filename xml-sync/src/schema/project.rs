//! `pom.xml`: the project object model.

use super::{Field, Schema};

const MAVEN_PLUGINS_GROUP: &str = "org.apache.maven.plugins";

pub static PARENT: Schema = Schema {
    name: "parent",
    root: "parent",
    fields: &[
        Field::scalar("artifactId"),
        Field::scalar("groupId"),
        Field::scalar("version"),
        Field::scalar_with_default("relativePath", "../pom.xml"),
    ],
};

pub static ORGANIZATION: Schema = Schema {
    name: "organization",
    root: "organization",
    fields: &[Field::scalar("name"), Field::scalar("url")],
};

pub static LICENSE: Schema = Schema {
    name: "license",
    root: "license",
    fields: &[
        Field::scalar("name"),
        Field::scalar("url"),
        Field::scalar("distribution"),
        Field::scalar("comments"),
    ],
};

pub static CONTRIBUTOR: Schema = Schema {
    name: "contributor",
    root: "contributor",
    fields: &[
        Field::scalar("name"),
        Field::scalar("email"),
        Field::scalar("url"),
        Field::scalar("organization"),
        Field::scalar("organizationUrl"),
        Field::scalar_list("roles", "role"),
        Field::scalar("timezone"),
        Field::properties("properties"),
    ],
};

pub static DEVELOPER: Schema = Schema {
    name: "developer",
    root: "developer",
    fields: &[
        Field::scalar("id"),
        Field::scalar("name"),
        Field::scalar("email"),
        Field::scalar("url"),
        Field::scalar("organization"),
        Field::scalar("organizationUrl"),
        Field::scalar_list("roles", "role"),
        Field::scalar("timezone"),
        Field::properties("properties"),
    ],
};

pub static MAILING_LIST: Schema = Schema {
    name: "mailingList",
    root: "mailingList",
    fields: &[
        Field::scalar("name"),
        Field::scalar("subscribe"),
        Field::scalar("unsubscribe"),
        Field::scalar("post"),
        Field::scalar("archive"),
        Field::scalar_list("otherArchives", "otherArchive"),
    ],
};

pub static PREREQUISITES: Schema = Schema {
    name: "prerequisites",
    root: "prerequisites",
    fields: &[Field::scalar_with_default("maven", "2.0")],
};

pub static SCM: Schema = Schema {
    name: "scm",
    root: "scm",
    fields: &[
        Field::scalar("connection"),
        Field::scalar("developerConnection"),
        Field::scalar_with_default("tag", "HEAD"),
        Field::scalar("url"),
    ],
};

pub static ISSUE_MANAGEMENT: Schema = Schema {
    name: "issueManagement",
    root: "issueManagement",
    fields: &[Field::scalar("system"), Field::scalar("url")],
};

pub static NOTIFIER: Schema = Schema {
    name: "notifier",
    root: "notifier",
    fields: &[
        Field::scalar_with_default("type", "mail"),
        Field::scalar_with_default("sendOnError", "true"),
        Field::scalar_with_default("sendOnFailure", "true"),
        Field::scalar_with_default("sendOnSuccess", "true"),
        Field::scalar_with_default("sendOnWarning", "true"),
        Field::scalar("address"),
        Field::properties("configuration"),
    ],
};

pub static CI_MANAGEMENT: Schema = Schema {
    name: "ciManagement",
    root: "ciManagement",
    fields: &[
        Field::scalar("system"),
        Field::scalar("url"),
        Field::composite_list("notifiers", "notifier", &NOTIFIER),
    ],
};

pub static REPOSITORY_POLICY: Schema = Schema {
    name: "repositoryPolicy",
    root: "releases",
    fields: &[
        Field::scalar("enabled"),
        Field::scalar("updatePolicy"),
        Field::scalar("checksumPolicy"),
    ],
};

pub static REPOSITORY: Schema = Schema {
    name: "repository",
    root: "repository",
    fields: &[
        Field::composite("releases", &REPOSITORY_POLICY),
        Field::composite("snapshots", &REPOSITORY_POLICY),
        Field::scalar("id"),
        Field::scalar("name"),
        Field::scalar("url"),
        Field::scalar_with_default("layout", "default"),
    ],
};

pub static DEPLOYMENT_REPOSITORY: Schema = Schema {
    name: "deploymentRepository",
    root: "repository",
    fields: &[
        Field::scalar_with_default("uniqueVersion", "true"),
        Field::composite("releases", &REPOSITORY_POLICY),
        Field::composite("snapshots", &REPOSITORY_POLICY),
        Field::scalar("id"),
        Field::scalar("name"),
        Field::scalar("url"),
        Field::scalar_with_default("layout", "default"),
    ],
};

pub static SITE: Schema = Schema {
    name: "site",
    root: "site",
    fields: &[Field::scalar("id"), Field::scalar("name"), Field::scalar("url")],
};

pub static RELOCATION: Schema = Schema {
    name: "relocation",
    root: "relocation",
    fields: &[
        Field::scalar("groupId"),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::scalar("message"),
    ],
};

pub static DISTRIBUTION_MANAGEMENT: Schema = Schema {
    name: "distributionManagement",
    root: "distributionManagement",
    fields: &[
        Field::composite("repository", &DEPLOYMENT_REPOSITORY),
        Field::composite("snapshotRepository", &DEPLOYMENT_REPOSITORY),
        Field::composite("site", &SITE),
        Field::scalar("downloadUrl"),
        Field::composite("relocation", &RELOCATION),
        Field::scalar("status"),
    ],
};

pub static EXCLUSION: Schema = Schema {
    name: "exclusion",
    root: "exclusion",
    fields: &[Field::scalar("artifactId"), Field::scalar("groupId")],
};

pub static DEPENDENCY: Schema = Schema {
    name: "dependency",
    root: "dependency",
    fields: &[
        Field::scalar("groupId"),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::scalar_with_default("type", "jar"),
        Field::scalar("classifier"),
        Field::scalar("scope"),
        Field::scalar("systemPath"),
        Field::composite_list("exclusions", "exclusion", &EXCLUSION),
        Field::scalar("optional"),
    ],
};

pub static DEPENDENCY_MANAGEMENT: Schema = Schema {
    name: "dependencyManagement",
    root: "dependencyManagement",
    fields: &[Field::composite_list("dependencies", "dependency", &DEPENDENCY)],
};

pub static EXTENSION: Schema = Schema {
    name: "extension",
    root: "extension",
    fields: &[
        Field::scalar("groupId"),
        Field::scalar("artifactId"),
        Field::scalar("version"),
    ],
};

pub static RESOURCE: Schema = Schema {
    name: "resource",
    root: "resource",
    fields: &[
        Field::scalar("targetPath"),
        Field::scalar("filtering"),
        Field::scalar("directory"),
        Field::scalar_list("includes", "include"),
        Field::scalar_list("excludes", "exclude"),
    ],
};

pub static PLUGIN_EXECUTION: Schema = Schema {
    name: "execution",
    root: "execution",
    fields: &[
        Field::scalar_with_default("id", "default"),
        Field::scalar("phase"),
        Field::scalar_list("goals", "goal"),
        Field::scalar("inherited"),
        Field::freeform("configuration"),
    ],
};

pub static PLUGIN: Schema = Schema {
    name: "plugin",
    root: "plugin",
    fields: &[
        Field::scalar_with_default("groupId", MAVEN_PLUGINS_GROUP),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::scalar("extensions"),
        Field::composite_list("executions", "execution", &PLUGIN_EXECUTION),
        Field::composite_list("dependencies", "dependency", &DEPENDENCY),
        Field::freeform("goals"),
        Field::scalar("inherited"),
        Field::freeform("configuration"),
    ],
};

pub static PLUGIN_MANAGEMENT: Schema = Schema {
    name: "pluginManagement",
    root: "pluginManagement",
    fields: &[Field::composite_list("plugins", "plugin", &PLUGIN)],
};

pub static BUILD: Schema = Schema {
    name: "build",
    root: "build",
    fields: &[
        Field::scalar("sourceDirectory"),
        Field::scalar("scriptSourceDirectory"),
        Field::scalar("testSourceDirectory"),
        Field::scalar("outputDirectory"),
        Field::scalar("testOutputDirectory"),
        Field::composite_list("extensions", "extension", &EXTENSION),
        Field::scalar("defaultGoal"),
        Field::composite_list("resources", "resource", &RESOURCE),
        Field::composite_list("testResources", "testResource", &RESOURCE),
        Field::scalar("directory"),
        Field::scalar("finalName"),
        Field::scalar_list("filters", "filter"),
        Field::composite("pluginManagement", &PLUGIN_MANAGEMENT),
        Field::composite_list("plugins", "plugin", &PLUGIN),
    ],
};

/// The subset of [`BUILD`] a profile may override.
pub static BUILD_BASE: Schema = Schema {
    name: "buildBase",
    root: "build",
    fields: &[
        Field::scalar("defaultGoal"),
        Field::composite_list("resources", "resource", &RESOURCE),
        Field::composite_list("testResources", "testResource", &RESOURCE),
        Field::scalar("directory"),
        Field::scalar("finalName"),
        Field::scalar_list("filters", "filter"),
        Field::composite("pluginManagement", &PLUGIN_MANAGEMENT),
        Field::composite_list("plugins", "plugin", &PLUGIN),
    ],
};

pub static REPORT_SET: Schema = Schema {
    name: "reportSet",
    root: "reportSet",
    fields: &[
        Field::scalar_with_default("id", "default"),
        Field::scalar_list("reports", "report"),
        Field::scalar("inherited"),
        Field::freeform("configuration"),
    ],
};

pub static REPORT_PLUGIN: Schema = Schema {
    name: "reportPlugin",
    root: "plugin",
    fields: &[
        Field::scalar_with_default("groupId", MAVEN_PLUGINS_GROUP),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::composite_list("reportSets", "reportSet", &REPORT_SET),
        Field::scalar("inherited"),
        Field::freeform("configuration"),
    ],
};

pub static REPORTING: Schema = Schema {
    name: "reporting",
    root: "reporting",
    fields: &[
        Field::scalar("excludeDefaults"),
        Field::scalar("outputDirectory"),
        Field::composite_list("plugins", "plugin", &REPORT_PLUGIN),
    ],
};

pub static ACTIVATION_OS: Schema = Schema {
    name: "activationOs",
    root: "os",
    fields: &[
        Field::scalar("name"),
        Field::scalar("family"),
        Field::scalar("arch"),
        Field::scalar("version"),
    ],
};

pub static ACTIVATION_PROPERTY: Schema = Schema {
    name: "activationProperty",
    root: "property",
    fields: &[Field::scalar("name"), Field::scalar("value")],
};

pub static ACTIVATION_FILE: Schema = Schema {
    name: "activationFile",
    root: "file",
    fields: &[Field::scalar("missing"), Field::scalar("exists")],
};

pub static ACTIVATION: Schema = Schema {
    name: "activation",
    root: "activation",
    fields: &[
        Field::scalar_with_default("activeByDefault", "false"),
        Field::scalar("jdk"),
        Field::composite("os", &ACTIVATION_OS),
        Field::composite("property", &ACTIVATION_PROPERTY),
        Field::composite("file", &ACTIVATION_FILE),
    ],
};

pub static PROFILE: Schema = Schema {
    name: "profile",
    root: "profile",
    fields: &[
        Field::scalar_with_default("id", "default"),
        Field::composite("activation", &ACTIVATION),
        Field::composite("build", &BUILD_BASE),
        Field::scalar_list("modules", "module"),
        Field::composite("distributionManagement", &DISTRIBUTION_MANAGEMENT),
        Field::properties("properties"),
        Field::composite("dependencyManagement", &DEPENDENCY_MANAGEMENT),
        Field::composite_list("dependencies", "dependency", &DEPENDENCY),
        Field::composite_list("repositories", "repository", &REPOSITORY),
        Field::composite_list("pluginRepositories", "pluginRepository", &REPOSITORY),
        Field::freeform("reports"),
        Field::composite("reporting", &REPORTING),
    ],
};

pub static PROJECT: Schema = Schema {
    name: "project",
    root: "project",
    fields: &[
        Field::scalar("modelVersion"),
        Field::composite("parent", &PARENT),
        Field::scalar("groupId"),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::scalar_with_default("packaging", "jar"),
        Field::scalar("name"),
        Field::scalar("description"),
        Field::scalar("url"),
        Field::scalar("inceptionYear"),
        Field::composite("organization", &ORGANIZATION),
        Field::composite_list("licenses", "license", &LICENSE),
        Field::composite_list("developers", "developer", &DEVELOPER),
        Field::composite_list("contributors", "contributor", &CONTRIBUTOR),
        Field::composite_list("mailingLists", "mailingList", &MAILING_LIST),
        Field::composite("prerequisites", &PREREQUISITES),
        Field::scalar_list("modules", "module"),
        Field::composite("scm", &SCM),
        Field::composite("issueManagement", &ISSUE_MANAGEMENT),
        Field::composite("ciManagement", &CI_MANAGEMENT),
        Field::composite("distributionManagement", &DISTRIBUTION_MANAGEMENT),
        Field::properties("properties"),
        Field::composite("dependencyManagement", &DEPENDENCY_MANAGEMENT),
        Field::composite_list("dependencies", "dependency", &DEPENDENCY),
        Field::composite_list("repositories", "repository", &REPOSITORY),
        Field::composite_list("pluginRepositories", "pluginRepository", &REPOSITORY),
        Field::composite("build", &BUILD),
        Field::freeform("reports"),
        Field::composite("reporting", &REPORTING),
        Field::composite_list("profiles", "profile", &PROFILE),
    ],
};
