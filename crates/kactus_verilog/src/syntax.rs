//! Fixed Verilog text shared by the writer and the preserver.

use kactus_ir::PinConnection;

/// The line separating generated text from the preserved implementation.
pub const MARKER: &str =
    "// WARNING: EVERYTHING ON AND ABOVE THIS LINE MAY BE OVERWRITTEN BY KACTUS2!!!";

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Comment text of the group of ports outside any bus interface.
pub const NO_INTERFACE: &str = "These ports are not in any interface";

/// Comment preceding the tie-off assignments.
pub const TIE_OFF_COMMENT: &str = "Tie off values for the ports of the encompassing component";

/// The comment heading a port or pin group.
pub fn group_comment(interface: Option<&str>) -> String {
    match interface {
        Some(name) => format!("// Interface: {name}"),
        None => format!("// {NO_INTERFACE}"),
    }
}

/// The expression inside the parentheses of a named port connection.
pub fn pin_expression(connection: &PinConnection) -> String {
    match connection {
        PinConnection::Unconnected => String::new(),
        PinConnection::Open => " ".to_string(),
        PinConnection::Tie(value) => value.clone(),
        PinConnection::Wire { name, bounds } | PinConnection::TopPort { name, bounds } => {
            format!("{name}{bounds}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_ir::Bounds;

    #[test]
    fn pin_expressions() {
        assert_eq!(pin_expression(&PinConnection::Unconnected), "");
        assert_eq!(pin_expression(&PinConnection::Open), " ");
        assert_eq!(pin_expression(&PinConnection::Tie("4'h0".to_string())), "4'h0");
        let wire = PinConnection::Wire {
            name: "sender_to_receiver_DATA".to_string(),
            bounds: Bounds::new("7", "0"),
        };
        assert_eq!(pin_expression(&wire), "sender_to_receiver_DATA[7:0]");
        let scalar = PinConnection::TopPort {
            name: "clk".to_string(),
            bounds: Bounds::default(),
        };
        assert_eq!(pin_expression(&scalar), "clk");
    }

    #[test]
    fn group_comments() {
        assert_eq!(group_comment(Some("data_bus")), "// Interface: data_bus");
        assert_eq!(
            group_comment(None),
            "// These ports are not in any interface"
        );
    }
}
