//! Built-in schemas against realistic descriptors.

use pretty_assertions::assert_eq;
use serde_json::json;

use xml_sync::schema::{self, metadata::METADATA, toolchains::TOOLCHAINS};
use xml_sync::{Document, ModelWriter, Record};

fn write(schema: &'static xml_sync::Schema, xml: &str, model: &Record) -> String {
    let mut document = Document::parse_str(xml).unwrap();
    ModelWriter::new(schema).to_string(model, &mut document).unwrap()
}

#[test]
fn test_toolchains_from_json() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<toolchains>
  <!-- JDKs -->
  <toolchain>
    <type>jdk</type>
    <provides>
      <version>11</version>
      <vendor>openjdk</vendor>
    </provides>
    <configuration>
      <jdkHome>/opt/jdk11</jdkHome>
    </configuration>
  </toolchain>
</toolchains>
"#;
    let json = json!({
        "toolchains": [
            {
                "type": "jdk",
                "provides": {"version": "17", "vendor": "openjdk"},
                "configuration": {"children": [{"name": "jdkHome", "value": "/opt/jdk17"}]}
            },
            {
                "type": "jdk",
                "provides": {"version": 21},
                "configuration": {"children": [{"name": "jdkHome", "value": "/opt/jdk21"}]}
            }
        ]
    });
    let model = Record::from_json(&json, &TOOLCHAINS).unwrap();

    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<toolchains>
  <!-- JDKs -->
  <toolchain>
    <type>jdk</type>
    <provides>
      <version>17</version>
      <vendor>openjdk</vendor>
    </provides>
    <configuration>
      <jdkHome>/opt/jdk17</jdkHome>
    </configuration>
  </toolchain>
  <toolchain>
    <type>jdk</type>
    <provides>
      <version>21</version>
    </provides>
    <configuration>
      <jdkHome>/opt/jdk21</jdkHome>
    </configuration>
  </toolchain>
</toolchains>
"#;
    assert_eq!(write(&TOOLCHAINS, xml, &model), expected);
}

#[test]
fn test_metadata_new_version() {
    let xml = "<metadata>\n  <groupId>org.example</groupId>\n  <artifactId>demo</artifactId>\n  <versioning>\n    <latest>1.0</latest>\n    <release>1.0</release>\n    <versions>\n      <version>1.0</version>\n    </versions>\n    <lastUpdated>20240101000000</lastUpdated>\n  </versioning>\n</metadata>";
    let model = Record::new()
        .with("groupId", "org.example")
        .with("artifactId", "demo")
        .with(
            "versioning",
            Record::new()
                .with("latest", "1.1")
                .with("release", "1.1")
                .with("versions", vec!["1.0", "1.1"])
                .with("lastUpdated", "20250101000000"),
        );

    assert_eq!(
        write(&METADATA, xml, &model),
        "<metadata>\n  <groupId>org.example</groupId>\n  <artifactId>demo</artifactId>\n  <versioning>\n    <latest>1.1</latest>\n    <release>1.1</release>\n    <versions>\n      <version>1.0</version>\n      <version>1.1</version>\n    </versions>\n    <lastUpdated>20250101000000</lastUpdated>\n  </versioning>\n</metadata>"
    );
}

#[test]
fn test_prefixed_root_keeps_prefix() {
    let xml = "<m:metadata xmlns:m=\"urn:m\">\n  <m:groupId>g</m:groupId>\n</m:metadata>";
    let model = Record::new().with("groupId", "g").with("artifactId", "a");
    assert_eq!(
        write(&METADATA, xml, &model),
        "<m:metadata xmlns:m=\"urn:m\">\n  <m:groupId>g</m:groupId>\n  <m:artifactId>a</m:artifactId>\n</m:metadata>"
    );
}

#[test]
fn test_settings_profile_activation() {
    let json = json!({
        "profiles": [{
            "id": "ci",
            "activation": {"activeByDefault": false, "property": {"name": "env.CI"}},
            "properties": {"skipTests": true}
        }],
        "activeProfiles": ["ci"]
    });
    let settings = schema::builtin("settings").unwrap();
    let model = Record::from_json(&json, settings).unwrap();

    assert_eq!(
        write(settings, "<settings>\n</settings>", &model),
        "<settings>\n  <profiles>\n    <profile>\n      <activation>\n        <property>\n          <name>env.CI</name>\n        </property>\n      </activation>\n      <properties>\n        <skipTests>true</skipTests>\n      </properties>\n      <id>ci</id>\n    </profile>\n  </profiles>\n  <activeProfiles>\n    <activeProfile>ci</activeProfile>\n  </activeProfiles>\n</settings>"
    );
}
