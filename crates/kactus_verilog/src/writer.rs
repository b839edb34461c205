//! Rendering of a [`GeneratedModule`] as Verilog-2001 text.
//!
//! Column widths follow the layout Kactus2 has always produced, so that
//! regenerating a file leaves untouched lines byte-identical.

use std::io::{self, Write};

use kactus_ir::{GeneratedModule, InstanceBlock, PortDecl};

use crate::syntax::{group_comment, pin_expression, INDENT, MARKER, TIE_OFF_COMMENT};

/// Writes Verilog modules to an output.
pub struct VerilogWriter<W: Write> {
    out: W,
}

impl<W: Write> VerilogWriter<W> {
    /// Creates a writer over the given output.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the module: declaration, wires, instances, tie-offs, the merge
    /// marker, the preserved implementation and `endmodule`.
    pub fn write_module(&mut self, module: &GeneratedModule) -> io::Result<()> {
        self.write_declaration(module)?;

        if !module.wires.is_empty() {
            writeln!(self.out)?;
            for wire in module.wires.values() {
                writeln!(self.out, "{INDENT}wire {:<6} {};", wire.bounds.render(), wire.name)?;
            }
        }

        for instance in &module.instances {
            writeln!(self.out)?;
            self.write_instance(instance)?;
        }

        if !module.tie_offs.is_empty() {
            writeln!(self.out)?;
            writeln!(self.out, "{INDENT}// {TIE_OFF_COMMENT}")?;
            for tie in &module.tie_offs {
                writeln!(self.out, "{INDENT}assign {} = {};", tie.port, tie.value)?;
            }
        }

        writeln!(self.out)?;
        writeln!(self.out, "{MARKER}")?;
        if let Some(implementation) = module.implementation.as_deref().filter(|s| !s.is_empty()) {
            writeln!(self.out, "{implementation}")?;
        }
        writeln!(self.out, "endmodule")?;
        if let Some(post) = &module.post_module {
            write!(self.out, "{post}")?;
        }
        Ok(())
    }

    fn write_declaration(&mut self, module: &GeneratedModule) -> io::Result<()> {
        let has_ports = module.ports().next().is_some();

        if module.parameters.is_empty() {
            if !has_ports {
                return writeln!(self.out, "module {}();", module.name);
            }
            writeln!(self.out, "module {}(", module.name)?;
        } else {
            writeln!(self.out, "module {} #(", module.name)?;
            let last = module.parameters.len() - 1;
            for (i, parameter) in module.parameters.iter().enumerate() {
                let separator = if i == last { "" } else { "," };
                writeln!(
                    self.out,
                    "{INDENT}{:<39}{:<16} = {}{separator}",
                    "parameter", parameter.name, parameter.value
                )?;
            }
            if !has_ports {
                return writeln!(self.out, ") ();");
            }
            writeln!(self.out, ") (")?;
        }

        let total = module.ports().count();
        let mut written = 0;
        for (i, group) in module.port_groups.iter().enumerate() {
            if i > 0 {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{INDENT}{}", group_comment(group.interface.as_deref()))?;
            for port in &group.ports {
                written += 1;
                let separator = if written == total { "" } else { "," };
                self.write_port(port, separator)?;
            }
        }
        writeln!(self.out, ");")
    }

    fn write_port(&mut self, port: &PortDecl, separator: &str) -> io::Result<()> {
        let Some(keyword) = port.direction.keyword() else {
            return Ok(());
        };
        writeln!(
            self.out,
            "{INDENT}{:<15}{:<20} {}{separator}",
            keyword,
            port.bounds.render(),
            port.name
        )
    }

    fn write_instance(&mut self, instance: &InstanceBlock) -> io::Result<()> {
        for line in instance.description.lines() {
            writeln!(self.out, "{}", format!("{INDENT}// {line}").trim_end())?;
        }
        writeln!(self.out, "{INDENT}// IP-XACT VLNV: {}", instance.vlnv)?;

        let total: usize = instance.pin_groups.iter().map(|g| g.pins.len()).sum();
        let open = if total == 0 { "();" } else { "(" };

        if instance.parameters.is_empty() {
            writeln!(
                self.out,
                "{INDENT}{} {}{open}",
                instance.module_name, instance.name
            )?;
        } else {
            writeln!(self.out, "{INDENT}{} #(", instance.module_name)?;
            let last = instance.parameters.len() - 1;
            for (i, parameter) in instance.parameters.iter().enumerate() {
                let close = if i == last { ")" } else { "," };
                writeln!(
                    self.out,
                    "{INDENT}{INDENT}.{:<20}({}){close}",
                    parameter.name, parameter.value
                )?;
            }
            writeln!(self.out, "{INDENT}{}{open}", instance.name)?;
        }

        let mut written = 0;
        for group in instance.pin_groups.iter().filter(|g| !g.pins.is_empty()) {
            writeln!(
                self.out,
                "{INDENT}{INDENT}{}",
                group_comment(group.interface.as_deref())
            )?;
            for pin in &group.pins {
                written += 1;
                let close = if written == total { ");" } else { "," };
                writeln!(
                    self.out,
                    "{INDENT}{INDENT}.{:<20}({}){close}",
                    pin.port,
                    pin_expression(&pin.connection)
                )?;
            }
        }
        Ok(())
    }
}

/// Renders a module into a string.
pub fn render_module(module: &GeneratedModule) -> io::Result<String> {
    let mut writer = VerilogWriter::new(Vec::new());
    writer.write_module(module)?;
    String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_common::Vlnv;
    use kactus_ir::{
        Bounds, ParameterDecl, PinConnection, PinDecl, PinGroup, PortGroup, SynthesizedWire,
        TieAssignment,
    };
    use kactus_model::Direction;

    fn port(name: &str, direction: Direction, bounds: Bounds) -> PortDecl {
        PortDecl {
            name: name.to_string(),
            direction,
            bounds,
        }
    }

    fn pin(port: &str, connection: PinConnection) -> PinDecl {
        PinDecl {
            port: port.to_string(),
            connection,
        }
    }

    fn data_wire() -> PinConnection {
        PinConnection::Wire {
            name: "sender_to_receiver_DATA".to_string(),
            bounds: Bounds::new("7", "0"),
        }
    }

    fn empty(name: &str) -> GeneratedModule {
        GeneratedModule::new(name, Vlnv::new("Test", "TestLibrary", name, "1.0"))
    }

    fn full() -> GeneratedModule {
        let mut module = empty("TestComponent");
        module.parameters.push(ParameterDecl::new("topParameter", "10"));
        module.port_groups = vec![
            PortGroup {
                interface: Some("data_bus".to_string()),
                ports: vec![
                    port("data_in", Direction::In, Bounds::new("7", "0")),
                    port("data_valid", Direction::Out, Bounds::default()),
                ],
            },
            PortGroup {
                interface: None,
                ports: vec![port("clk", Direction::In, Bounds::default())],
            },
        ];
        module
            .wires
            .alloc(SynthesizedWire::new("sender_to_receiver_DATA", Bounds::new("7", "0")));
        module.instances.push(InstanceBlock {
            name: "sender".to_string(),
            module_name: "TestSender".to_string(),
            vlnv: Vlnv::new("Test", "TestLibrary", "TestSender", "1.0"),
            description: "The sender".to_string(),
            parameters: vec![ParameterDecl::new("senderID", "topParameter")],
            pin_groups: vec![PinGroup {
                interface: Some("data_bus".to_string()),
                pins: vec![pin("data_out", data_wire())],
            }],
        });
        module.instances.push(InstanceBlock {
            name: "receiver".to_string(),
            module_name: "TestReceiver".to_string(),
            vlnv: Vlnv::new("Test", "TestLibrary", "TestReceiver", "1.0"),
            description: String::new(),
            parameters: Vec::new(),
            pin_groups: vec![
                PinGroup {
                    interface: Some("data_bus".to_string()),
                    pins: vec![pin("data_in", data_wire())],
                },
                PinGroup {
                    interface: None,
                    pins: vec![
                        pin("nc", PinConnection::Unconnected),
                        pin("open_pin", PinConnection::Open),
                        pin("zeroTieOff", PinConnection::Tie("0".to_string())),
                    ],
                },
            ],
        });
        module.tie_offs.push(TieAssignment {
            port: "data_valid".to_string(),
            value: "1'b0".to_string(),
        });
        module
    }

    #[test]
    fn full_module() {
        let expected = "\
module TestComponent #(
    parameter                              topParameter     = 10
) (
    // Interface: data_bus
    input          [7:0]                data_in,
    output                              data_valid,

    // These ports are not in any interface
    input                               clk
);

    wire [7:0]  sender_to_receiver_DATA;

    // The sender
    // IP-XACT VLNV: Test:TestLibrary:TestSender:1.0
    TestSender #(
        .senderID            (topParameter))
    sender(
        // Interface: data_bus
        .data_out            (sender_to_receiver_DATA[7:0]));

    // IP-XACT VLNV: Test:TestLibrary:TestReceiver:1.0
    TestReceiver receiver(
        // Interface: data_bus
        .data_in             (sender_to_receiver_DATA[7:0]),
        // These ports are not in any interface
        .nc                  (),
        .open_pin            ( ),
        .zeroTieOff          (0));

    // Tie off values for the ports of the encompassing component
    assign data_valid = 1'b0;

// WARNING: EVERYTHING ON AND ABOVE THIS LINE MAY BE OVERWRITTEN BY KACTUS2!!!
endmodule
";
        assert_eq!(render_module(&full()).unwrap(), expected);
    }

    #[test]
    fn empty_module() {
        let expected = format!("module TestComponent();\n\n{MARKER}\nendmodule\n");
        assert_eq!(render_module(&empty("TestComponent")).unwrap(), expected);
    }

    #[test]
    fn parameters_without_ports() {
        let mut module = empty("TestComponent");
        module.parameters.push(ParameterDecl::new("a", "1"));
        module.parameters.push(ParameterDecl::new("b", "a*2"));
        let text = render_module(&module).unwrap();
        assert!(text.starts_with(
            "module TestComponent #(\n    parameter                              a                = 1,\n    parameter                              b                = a*2\n) ();\n"
        ));
    }

    #[test]
    fn ports_without_parameters() {
        let mut module = empty("TestComponent");
        module.port_groups.push(PortGroup {
            interface: None,
            ports: vec![port("clk", Direction::In, Bounds::default())],
        });
        let text = render_module(&module).unwrap();
        assert!(text.starts_with(
            "module TestComponent(\n    // These ports are not in any interface\n    input                               clk\n);\n"
        ));
    }

    #[test]
    fn implementation_and_post_module() {
        let mut module = empty("TestComponent");
        module.implementation = Some("assign foo = bar;".to_string());
        module.post_module = Some("\n// trailing comment\n".to_string());
        let text = render_module(&module).unwrap();
        assert_eq!(
            text,
            format!(
                "module TestComponent();\n\n{MARKER}\nassign foo = bar;\nendmodule\n\n// trailing comment\n"
            )
        );
    }

    #[test]
    fn instance_without_ports() {
        let mut module = empty("TestComponent");
        module.instances.push(InstanceBlock {
            name: "u0".to_string(),
            module_name: "Leaf".to_string(),
            vlnv: Vlnv::new("Test", "TestLibrary", "Leaf", "1.0"),
            description: String::new(),
            parameters: Vec::new(),
            pin_groups: Vec::new(),
        });
        let text = render_module(&module).unwrap();
        assert!(text.contains("    // IP-XACT VLNV: Test:TestLibrary:Leaf:1.0\n    Leaf u0();\n"));
    }

    #[test]
    fn parameterized_instance_without_ports() {
        let mut module = empty("TestComponent");
        module.instances.push(InstanceBlock {
            name: "u0".to_string(),
            module_name: "Leaf".to_string(),
            vlnv: Vlnv::new("Test", "TestLibrary", "Leaf", "1.0"),
            description: String::new(),
            parameters: vec![ParameterDecl::new("W", "8")],
            pin_groups: Vec::new(),
        });
        let text = render_module(&module).unwrap();
        assert!(text.contains("    Leaf #(\n        .W                   (8))\n    u0();\n"));
    }
}
