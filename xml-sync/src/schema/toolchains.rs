//! `toolchains.xml`: the toolchains a build may select from.

use super::{Field, Schema};

pub static TOOLCHAIN: Schema = Schema {
    name: "toolchain",
    root: "toolchain",
    fields: &[
        Field::scalar("type"),
        Field::properties("provides"),
        Field::freeform("configuration"),
    ],
};

pub static TOOLCHAINS: Schema = Schema {
    name: "toolchains",
    root: "toolchains",
    fields: &[Field::items("toolchains", "toolchain", &TOOLCHAIN)],
};
