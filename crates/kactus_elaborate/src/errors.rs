//! Diagnostic codes and helper functions for elaboration errors and warnings.
//!
//! Error codes `E300`--`E310` mark elements that were emitted in degraded form
//! (parameter cycles, unresolved references, conflicting pin bindings).
//! Warning codes `W300`--`W310` mark elements that were dropped or ignored.

use kactus_common::ElementPath;
use kactus_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};

/// Parameter is part of a reference cycle.
pub const E300: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 300,
};

/// Parameter expression references an id that is not in scope.
pub const E301: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 301,
};

/// A pin would be bound to two different nets.
pub const E310: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 310,
};

/// Instance of a component that is not in the library.
pub const W300: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 300,
};

/// Connection references an unknown instance.
pub const W301: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 301,
};

/// Connection references an unknown bus interface.
pub const W302: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 302,
};

/// Reference to an unknown port.
pub const W303: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 303,
};

/// Two instances share a name.
pub const W304: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 304,
};

/// Interconnection with fewer than two usable endpoints.
pub const W305: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 305,
};

/// Ad-hoc connection needs either more ports or a tie-off.
pub const W306: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 306,
};

/// `default` tie-off on a port without a default value.
pub const W307: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 307,
};

/// Tie-off on a top-level input port.
pub const W308: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 308,
};

/// Bus interface references an abstraction definition missing from the library.
pub const W309: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 309,
};

/// Port direction disagrees with the abstraction definition.
pub const W310: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 310,
};

/// Creates an error for a parameter on a reference cycle.
pub fn error_parameter_cycle(name: &str, cycle: &[&str], location: ElementPath) -> Diagnostic {
    Diagnostic::error(
        E300,
        format!("parameter `{name}` is part of a reference cycle"),
        location,
    )
    .with_note(format!("cycle: {}", cycle.join(" -> ")))
    .with_help("its value is emitted without rewriting references")
}

/// Creates an error for a reference to an id that is not in scope.
pub fn error_unresolved_reference(name: &str, reference: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::error(
        E301,
        format!("parameter `{name}` references unknown id `{reference}`"),
        location,
    )
    .with_help("its value is emitted without rewriting references")
}

/// Creates an error for a pin that is already bound to another net.
pub fn error_pin_conflict(
    pin: &str,
    existing: &str,
    rejected: &str,
    location: ElementPath,
    first: ElementPath,
) -> Diagnostic {
    Diagnostic::error(
        E310,
        format!("pin `{pin}` is already connected to `{existing}`"),
        location,
    )
    .with_label(Label::secondary(first, "first connected here"))
    .with_note(format!("the connection to `{rejected}` is ignored"))
}

/// Creates a warning for an instance of an unknown component.
pub fn warning_unknown_component(instance: &str, vlnv: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W300,
        format!("component `{vlnv}` of instance `{instance}` is not in the library"),
        location,
    )
    .with_note("the instance is not generated")
}

/// Creates a warning for a connection referencing an unknown instance.
pub fn warning_unknown_instance(instance: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(W301, format!("unknown instance `{instance}`"), location)
}

/// Creates a warning for a connection referencing an unknown bus interface.
pub fn warning_unknown_interface(owner: &str, interface: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W302,
        format!("`{owner}` has no bus interface `{interface}`"),
        location,
    )
}

/// Creates a warning for a reference to an unknown port.
pub fn warning_unknown_port(owner: &str, port: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(W303, format!("`{owner}` has no port `{port}`"), location)
}

/// Creates a warning for a duplicate instance name.
pub fn warning_duplicate_instance(name: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(W304, format!("duplicate instance name `{name}`"), location)
        .with_note("only the first instance with this name is generated")
}

/// Creates a warning for an interconnection left with too few endpoints.
pub fn warning_too_few_endpoints(name: &str, count: usize, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W305,
        format!("interconnection `{name}` has {count} usable endpoint(s)"),
        location,
    )
    .with_note("nothing is generated for it")
}

/// Creates a warning for an ad-hoc connection that connects nothing.
pub fn warning_adhoc_needs_ports(name: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W306,
        format!("ad-hoc connection `{name}` needs either more ports or a tie-off"),
        location,
    )
}

/// Creates a warning for a `default` tie-off on a port without a default value.
pub fn warning_missing_default(port: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W307,
        format!("port `{port}` has no default value for a `default` tie-off"),
        location,
    )
    .with_note("the tie-off is omitted")
}

/// Creates a warning for a tie-off on a top-level input port.
pub fn warning_tie_on_input(port: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W308,
        format!("tie-off on top-level input port `{port}` is ignored"),
        location,
    )
    .with_help("only outputs and inouts can be driven from inside the module")
}

/// Creates a warning for an abstraction definition missing from the library.
pub fn warning_missing_abstraction(interface: &str, vlnv: &str, location: ElementPath) -> Diagnostic {
    Diagnostic::warning(
        W309,
        format!("abstraction definition `{vlnv}` of bus interface `{interface}` is not in the library"),
        location,
    )
    .with_note("logical widths fall back to the physical port ranges")
}

/// Creates a warning for a port whose direction disagrees with its logical signal.
pub fn warning_direction_mismatch(
    port: &str,
    actual: &str,
    expected: &str,
    location: ElementPath,
) -> Diagnostic {
    Diagnostic::warning(
        W310,
        format!("port `{port}` is `{actual}` but its logical signal requires `{expected}`"),
        location,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kactus_diagnostics::Severity;

    #[test]
    fn code_formats() {
        assert_eq!(format!("{E300}"), "E300");
        assert_eq!(format!("{E310}"), "E310");
        assert_eq!(format!("{W300}"), "W300");
        assert_eq!(format!("{W310}"), "W310");
    }

    #[test]
    fn parameter_cycle_diagnostic() {
        let d = error_parameter_cycle("first", &["first", "second", "first"], ElementPath::UNKNOWN);
        assert_eq!(d.code, E300);
        assert_eq!(d.severity, Severity::Error);
        assert!(d.notes[0].contains("first -> second -> first"));
    }

    #[test]
    fn unresolved_reference_diagnostic() {
        let d = error_unresolved_reference("width", "uuid_gone", ElementPath::UNKNOWN);
        assert_eq!(d.code, E301);
        assert!(d.message.contains("uuid_gone"));
    }

    #[test]
    fn pin_conflict_has_label() {
        let d = error_pin_conflict(
            "receiver.data_in",
            "a_DATA",
            "b_DATA",
            ElementPath::UNKNOWN,
            ElementPath::UNKNOWN,
        );
        assert_eq!(d.code, E310);
        assert_eq!(d.labels.len(), 1);
    }

    #[test]
    fn unknown_component_is_warning() {
        let d = warning_unknown_component("ghost", "a:b:c:1", ElementPath::UNKNOWN);
        assert_eq!(d.code, W300);
        assert_eq!(d.severity, Severity::Warning);
    }

    #[test]
    fn warning_codes_match_helpers() {
        let path = ElementPath::UNKNOWN;
        assert_eq!(warning_unknown_instance("x", path.clone()).code, W301);
        assert_eq!(warning_unknown_interface("x", "bus", path.clone()).code, W302);
        assert_eq!(warning_unknown_port("x", "p", path.clone()).code, W303);
        assert_eq!(warning_duplicate_instance("x", path.clone()).code, W304);
        assert_eq!(warning_too_few_endpoints("c", 1, path.clone()).code, W305);
        assert_eq!(warning_adhoc_needs_ports("c", path.clone()).code, W306);
        assert_eq!(warning_missing_default("p", path.clone()).code, W307);
        assert_eq!(warning_tie_on_input("p", path.clone()).code, W308);
        assert_eq!(warning_missing_abstraction("bus", "a:b:c:1", path.clone()).code, W309);
        assert_eq!(warning_direction_mismatch("p", "in", "out", path).code, W310);
    }
}
