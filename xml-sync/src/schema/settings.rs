//! `settings.xml`: user and installation wide build settings.

use super::project::ACTIVATION;
use super::{Field, Schema};

pub static PROXY: Schema = Schema {
    name: "proxy",
    root: "proxy",
    fields: &[
        Field::scalar_with_default("active", "true"),
        Field::scalar_with_default("protocol", "http"),
        Field::scalar("username"),
        Field::scalar("password"),
        Field::scalar_with_default("port", "8080"),
        Field::scalar("host"),
        Field::scalar("nonProxyHosts"),
        Field::scalar_with_default("id", "default"),
    ],
};

pub static SERVER: Schema = Schema {
    name: "server",
    root: "server",
    fields: &[
        Field::scalar("username"),
        Field::scalar("password"),
        Field::scalar("privateKey"),
        Field::scalar("passphrase"),
        Field::scalar("filePermissions"),
        Field::scalar("directoryPermissions"),
        Field::scalar_with_default("id", "default"),
    ],
};

pub static MIRROR: Schema = Schema {
    name: "mirror",
    root: "mirror",
    fields: &[
        Field::scalar("mirrorOf"),
        Field::scalar("name"),
        Field::scalar("url"),
        Field::scalar("layout"),
        Field::scalar_with_default("mirrorOfLayouts", "default,legacy"),
        Field::scalar_with_default("id", "default"),
    ],
};

pub static REPOSITORY_POLICY: Schema = Schema {
    name: "repositoryPolicy",
    root: "releases",
    fields: &[
        Field::scalar_with_default("enabled", "true"),
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

pub static PROFILE: Schema = Schema {
    name: "profile",
    root: "profile",
    fields: &[
        Field::composite("activation", &ACTIVATION),
        Field::properties("properties"),
        Field::composite_list("repositories", "repository", &REPOSITORY),
        Field::composite_list("pluginRepositories", "pluginRepository", &REPOSITORY),
        Field::scalar_with_default("id", "default"),
    ],
};

pub static SETTINGS: Schema = Schema {
    name: "settings",
    root: "settings",
    fields: &[
        Field::scalar("localRepository"),
        Field::scalar_with_default("interactiveMode", "true"),
        Field::scalar_with_default("usePluginRegistry", "false"),
        Field::scalar_with_default("offline", "false"),
        Field::composite_list("proxies", "proxy", &PROXY),
        Field::composite_list("servers", "server", &SERVER),
        Field::composite_list("mirrors", "mirror", &MIRROR),
        Field::composite_list("profiles", "profile", &PROFILE),
        Field::scalar_list("activeProfiles", "activeProfile"),
        Field::scalar_list("pluginGroups", "pluginGroup"),
    ],
};
