//! Psychological state carried per agent.

/// How an agent currently categorizes itself.  Written by the cognition
/// model each step; locomotion and event handling read it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SelfCategory {
    /// Heading for the current target at free-flow speed.
    #[default]
    TargetOriented,
    /// Blocked or assisting; yields movement priority.
    Cooperative,
    /// Standing still deliberately.
    Wait,
}

/// How far information (an announcement, an alarm) has propagated to the
/// agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InformationState {
    #[default]
    NoInformation,
    InformationReceived,
    /// Received and acted upon.
    Convinced,
    /// Not informed directly, but following a group member who was.
    FollowInformedGroupMember,
}
