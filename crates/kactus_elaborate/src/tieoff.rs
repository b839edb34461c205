//! Tie-off policies of ad-hoc connections.

use kactus_ir::PinConnection;
use kactus_model::Direction;

/// How a tie-off value of an ad-hoc connection drives its ports.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TiePolicy {
    /// Drive the port's declared default value.
    Default,
    /// Leave the pin explicitly open.
    Open,
    /// Drive the given expression.
    Value(String),
}

impl TiePolicy {
    /// Parses a tie-off value. Returns `None` for an empty value.
    pub fn parse(value: &str) -> Option<TiePolicy> {
        match value.trim() {
            "" => None,
            "default" => Some(TiePolicy::Default),
            "open" => Some(TiePolicy::Open),
            other => Some(TiePolicy::Value(other.to_string())),
        }
    }
}

/// What a tie-off does to one instance pin.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PinTie {
    /// Bind the pin to this connection.
    Bind(PinConnection),
    /// The `default` policy found no default value.
    MissingDefault,
}

/// Resolves a tie-off for an instance pin.
///
/// Inputs and inouts receive the value; outputs are connected open, since a
/// constant cannot be driven into them. `rewrite` turns the raw expression of
/// a [`TiePolicy::Value`] into the instance's scope.
pub fn tie_instance_pin(
    policy: &TiePolicy,
    direction: Direction,
    default_value: &str,
    rewrite: impl FnOnce(&str) -> String,
) -> PinTie {
    if !direction.accepts_drive() {
        return PinTie::Bind(PinConnection::Open);
    }
    match policy {
        TiePolicy::Open => PinTie::Bind(PinConnection::Open),
        TiePolicy::Default if default_value.is_empty() => PinTie::MissingDefault,
        TiePolicy::Default => PinTie::Bind(PinConnection::Tie(default_value.to_string())),
        TiePolicy::Value(value) => PinTie::Bind(PinConnection::Tie(rewrite(value))),
    }
}

/// What a tie-off does to one top-level port.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PortTie {
    /// Assign this value to the port.
    Assign(String),
    /// Nothing to generate.
    Omit,
    /// The port is an input and cannot be driven from inside the module.
    InputPort,
    /// The `default` policy found no default value.
    MissingDefault,
}

/// Resolves a tie-off for a port of the enclosing module.
///
/// Seen from inside the module, only outputs and inouts can be driven.
pub fn tie_top_port(
    policy: &TiePolicy,
    direction: Direction,
    default_value: &str,
    rewrite: impl FnOnce(&str) -> String,
) -> PortTie {
    if *policy == TiePolicy::Open {
        return PortTie::Omit;
    }
    match direction {
        Direction::Out | Direction::InOut => {}
        Direction::In => return PortTie::InputPort,
        Direction::Phantom => return PortTie::Omit,
    }
    match policy {
        TiePolicy::Default if default_value.is_empty() => PortTie::MissingDefault,
        TiePolicy::Default => PortTie::Assign(default_value.to_string()),
        TiePolicy::Value(value) => PortTie::Assign(rewrite(value)),
        TiePolicy::Open => PortTie::Omit,
    }
}
