//! The comment block at the top of every generated file.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use kactus_common::Vlnv;
use kactus_config::GeneratorConfig;

const RULE: &str =
    "//-----------------------------------------------------------------------------";

/// The contents of the file header.
#[derive(Clone, Debug)]
pub struct FileHeader {
    /// The generated file's name, without directories.
    pub file_name: String,
    /// The component description, one comment line per line.
    pub description: String,
    /// The "Created by" entry.
    pub author: String,
    /// Tool name and version.
    pub tool: String,
    /// Plugin name and version.
    pub plugin: String,
    /// The originating component.
    pub vlnv: Vlnv,
    /// Path of the component's XML document.
    pub xml_path: String,
    /// When the file was generated.
    pub generated_at: DateTime<Local>,
}

fn joined(name: &str, version: &str) -> String {
    format!("{name} {version}").trim().to_string()
}

impl FileHeader {
    /// Creates a header stamped with the current local time.
    pub fn new(file_name: impl Into<String>, vlnv: Vlnv, config: &GeneratorConfig) -> Self {
        let generator = &config.generator;
        Self {
            file_name: file_name.into(),
            description: String::new(),
            author: config.header.author.clone(),
            tool: joined(&generator.tool, &generator.tool_version),
            plugin: joined(&generator.plugin, &generator.plugin_version),
            vlnv,
            xml_path: String::new(),
            generated_at: Local::now(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the XML document path.
    pub fn with_xml_path(mut self, path: impl Into<String>) -> Self {
        self.xml_path = path.into();
        self
    }

    /// Replaces the generation time.
    pub fn with_timestamp(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = at;
        self
    }

    /// Writes the header block.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{RULE}")?;
        writeln!(out, "// File          : {}", self.file_name)?;
        writeln!(
            out,
            "// Creation date : {}",
            self.generated_at.format("%d.%m.%Y")
        )?;
        writeln!(
            out,
            "// Creation time : {}",
            self.generated_at.format("%H:%M:%S")
        )?;

        let mut lines = self.description.lines();
        let first = lines.next().unwrap_or("");
        writeln!(out, "{}", format!("// Description   : {first}").trim_end())?;
        for line in lines {
            writeln!(out, "{}", format!("//                 {line}").trim_end())?;
        }

        writeln!(out, "// Created by    : {}", self.author)?;
        writeln!(out, "// Tool : {}", self.tool)?;
        writeln!(out, "// Plugin : {}", self.plugin)?;
        writeln!(
            out,
            "// This file was generated based on IP-XACT component {}",
            self.vlnv
        )?;
        writeln!(out, "// whose XML file is {}", self.xml_path)?;
        writeln!(out, "{RULE}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn header() -> FileHeader {
        let mut config = GeneratorConfig::default();
        config.header.author = "designer".to_string();
        config.generator.tool_version = "3.13.0".to_string();
        config.generator.plugin_version = "2.2".to_string();
        FileHeader::new(
            "TestComponent.v",
            Vlnv::new("Test", "TestLibrary", "TestComponent", "1.0"),
            &config,
        )
        .with_xml_path("/lib/TestComponent.1.0.xml")
        .with_timestamp(Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap())
    }

    fn render(header: &FileHeader) -> String {
        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_header() {
        let text = render(&header().with_description("First line\nSecond line"));
        let expected = "\
//-----------------------------------------------------------------------------
// File          : TestComponent.v
// Creation date : 07.03.2026
// Creation time : 09:05:02
// Description   : First line
//                 Second line
// Created by    : designer
// Tool : Kactus2 3.13.0
// Plugin : Verilog generator 2.2
// This file was generated based on IP-XACT component Test:TestLibrary:TestComponent:1.0
// whose XML file is /lib/TestComponent.1.0.xml
//-----------------------------------------------------------------------------
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_description_has_no_trailing_space() {
        let text = render(&header());
        assert!(text.contains("// Description   :\n"));
    }

    #[test]
    fn missing_version_is_trimmed() {
        let config = GeneratorConfig::default();
        let h = FileHeader::new("x.v", Vlnv::new("a", "b", "c", "1"), &config);
        assert_eq!(h.tool, "Kactus2");
    }
}
