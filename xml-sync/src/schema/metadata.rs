//! `maven-metadata.xml`: repository metadata for an artifact or group.

use super::{Field, Schema};

pub static PLUGIN: Schema = Schema {
    name: "plugin",
    root: "plugin",
    fields: &[
        Field::scalar("name"),
        Field::scalar("prefix"),
        Field::scalar("artifactId"),
    ],
};

pub static SNAPSHOT: Schema = Schema {
    name: "snapshot",
    root: "snapshot",
    fields: &[
        Field::scalar("timestamp"),
        Field::scalar_with_default("buildNumber", "0"),
        Field::scalar_with_default("localCopy", "false"),
    ],
};

pub static SNAPSHOT_VERSION: Schema = Schema {
    name: "snapshotVersion",
    root: "snapshotVersion",
    fields: &[
        Field::scalar_with_default("classifier", ""),
        Field::scalar("extension"),
        Field::scalar("value"),
        Field::scalar("updated"),
    ],
};

pub static VERSIONING: Schema = Schema {
    name: "versioning",
    root: "versioning",
    fields: &[
        Field::scalar("latest"),
        Field::scalar("release"),
        Field::composite("snapshot", &SNAPSHOT),
        Field::scalar_list("versions", "version"),
        Field::scalar("lastUpdated"),
        Field::composite_list("snapshotVersions", "snapshotVersion", &SNAPSHOT_VERSION),
    ],
};

pub static METADATA: Schema = Schema {
    name: "metadata",
    root: "metadata",
    fields: &[
        Field::scalar("groupId"),
        Field::scalar("artifactId"),
        Field::scalar("version"),
        Field::composite("versioning", &VERSIONING),
        Field::composite_list("plugins", "plugin", &PLUGIN),
    ],
};
