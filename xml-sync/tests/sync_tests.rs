//! End-to-end synchronization of project models into existing documents.

use pretty_assertions::assert_eq;
use rstest::rstest;

use xml_sync::schema::project::PROJECT;
use xml_sync::schema::{sync_document, Field, Schema};
use xml_sync::{Document, FreeformNode, ModelWriter, OutputFormat, Record, Synchronizer};

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- header -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>

    <groupId>org.example</groupId>
    <artifactId>demo</artifactId>
    <version>1.0</version>

    <dependencies>
        <!-- logging -->
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
            <version>2.0.9</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13</version>
            <scope>test</scope>
        </dependency>
    </dependencies>
</project>
"#;

fn project_model() -> Record {
    Record::new()
        .with("modelVersion", "4.0.0")
        .with("groupId", "org.example")
        .with("artifactId", "demo")
        .with("version", "1.1")
        .with("name", "Demo")
        .with(
            "dependencies",
            vec![Record::new()
                .with("groupId", "org.slf4j")
                .with("artifactId", "slf4j-api")
                .with("version", "2.0.12")],
        )
}

fn write(xml: &str, model: &Record) -> String {
    let mut document = Document::parse_str(xml).unwrap();
    ModelWriter::new(&PROJECT)
        .to_string(model, &mut document)
        .unwrap()
}

#[test]
fn test_project_update_keeps_layout() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- header -->
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>

    <groupId>org.example</groupId>
    <artifactId>demo</artifactId>
    <version>1.1</version>
    <name>Demo</name>

    <dependencies>
        <!-- logging -->
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
            <version>2.0.12</version>
        </dependency>
    </dependencies>
</project>
"#;
    assert_eq!(write(POM, &project_model()), expected);
}

#[test]
fn test_second_pass_changes_nothing() {
    let once = write(POM, &project_model());
    let twice = write(&once, &project_model());
    assert_eq!(once, twice);
}

#[test]
fn test_unchanged_model_round_trips() {
    let model = Record::new()
        .with("modelVersion", "4.0.0")
        .with("groupId", "org.example")
        .with("artifactId", "demo")
        .with("version", "1.0")
        .with(
            "dependencies",
            vec![
                Record::new()
                    .with("groupId", "org.slf4j")
                    .with("artifactId", "slf4j-api")
                    .with("version", "2.0.9"),
                Record::new()
                    .with("groupId", "junit")
                    .with("artifactId", "junit")
                    .with("version", "4.13")
                    .with("scope", "test"),
            ],
        );
    assert_eq!(write(POM, &model), POM);
}

#[test]
fn test_new_elements_take_document_namespace() {
    let document = Document::parse_str(POM).unwrap();
    sync_document(&Synchronizer::default(), &PROJECT, &project_model(), &document).unwrap();

    let root = document.root_element().unwrap();
    let name = xml_sync::NodeInner::find_child(&root, "name", "http://maven.apache.org/POM/4.0.0");
    assert!(name.is_some());
}

#[rstest]
#[case::absent_stays_absent("<project>\n</project>", Some("jar"), "<project>\n</project>")]
#[case::default_kept("<project>\n  <packaging>jar</packaging>\n</project>", Some("jar"), "<project>\n  <packaging>jar</packaging>\n</project>")]
#[case::other_value_reset("<project>\n  <packaging>war</packaging>\n</project>", Some("jar"), "<project>\n  <packaging>jar</packaging>\n</project>")]
#[case::non_default_written("<project>\n</project>", Some("war"), "<project>\n  <packaging>war</packaging>\n</project>")]
#[case::missing_value_removed("<project>\n  <packaging>jar</packaging>\n</project>", None, "<project>\n</project>")]
fn test_default_values(#[case] xml: &str, #[case] packaging: Option<&str>, #[case] expected: &str) {
    let mut model = Record::new();
    if let Some(packaging) = packaging {
        model.set("packaging", packaging);
    }
    assert_eq!(write(xml, &model), expected);
}

#[test]
fn test_formatting_isolation() {
    static PAIR: Schema = Schema {
        name: "pair",
        root: "parent",
        fields: &[Field::scalar("a"), Field::scalar("b")],
    };
    let document = Document::parse_str("<parent><a>1</a><b>2</b></parent>").unwrap();
    let model = Record::new().with("a", "1").with("b", "3");
    sync_document(&Synchronizer::default(), &PAIR, &model, &document).unwrap();
    assert_eq!(
        document.to_xml(&OutputFormat::default()).unwrap(),
        "<parent><a>1</a><b>3</b></parent>"
    );
}

#[test]
fn test_modules_shrink_and_grow() {
    let xml = "<project>\n  <modules>\n    <!-- core first -->\n    <module>1</module>\n    <module>3</module>\n    <module>5</module>\n  </modules>\n</project>";
    let shrunk = write(xml, &Record::new().with("modules", vec!["1"]));
    assert_eq!(
        shrunk,
        "<project>\n  <modules>\n    <!-- core first -->\n    <module>1</module>\n  </modules>\n</project>"
    );

    let grown = write(&shrunk, &Record::new().with("modules", vec!["1", "3", "5"]));
    assert_eq!(grown, xml);
}

#[test]
fn test_plugin_configuration_merge() {
    let xml = r#"<project>
  <build>
    <plugins>
      <plugin>
        <artifactId>maven-compiler-plugin</artifactId>
        <configuration>
          <!-- language level -->
          <release>11</release>
          <compilerArgs><![CDATA[-Xlint:all]]></compilerArgs>
          <fork>true</fork>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>"#;
    let configuration = FreeformNode::new("configuration")
        .with_child(FreeformNode::new("release").with_value("17"))
        .with_child(FreeformNode::new("compilerArgs").with_value("-Xlint:all"))
        .with_child(FreeformNode::new("encoding").with_value("UTF-8"));
    let model = Record::new().with(
        "build",
        Record::new().with(
            "plugins",
            vec![Record::new()
                .with("groupId", "org.apache.maven.plugins")
                .with("artifactId", "maven-compiler-plugin")
                .with("configuration", configuration)],
        ),
    );

    let expected = r#"<project>
  <build>
    <plugins>
      <plugin>
        <artifactId>maven-compiler-plugin</artifactId>
        <configuration>
          <!-- language level -->
          <release>17</release>
          <compilerArgs><![CDATA[-Xlint:all]]></compilerArgs>
          <encoding>UTF-8</encoding>
        </configuration>
      </plugin>
    </plugins>
  </build>
</project>"#;
    assert_eq!(write(xml, &model), expected);
}

#[rstest]
#[case::four_spaces("    ")]
#[case::tabs("\t")]
fn test_first_field_matches_sibling_indentation(#[case] unit: &str) {
    let xml = format!(
        "<project>\n{u}<groupId>g</groupId>\n{u}<artifactId>a</artifactId>\n</project>\n",
        u = unit
    );
    let model = Record::new()
        .with("modelVersion", "4.0.0")
        .with("groupId", "g")
        .with("artifactId", "a");
    let expected = format!(
        "<project>\n{u}<modelVersion>4.0.0</modelVersion>\n{u}<groupId>g</groupId>\n{u}<artifactId>a</artifactId>\n</project>\n",
        u = unit
    );
    assert_eq!(write(&xml, &model), expected);
}
