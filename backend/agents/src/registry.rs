/// Persona registry — selects the narration agent for a run.
///
/// The registry content is fixed at definition time: callers wanting custom
/// personas extend [`AgentRegistry::builtin`], they do not mutate a live
/// registry.
use once_cell::sync::Lazy;

use sightspeak_core::{Agent, SightSpeakError, DEFAULT_VOICE};

/// Registry of all available narration personas, in declaration order.
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

static BUILTIN: Lazy<AgentRegistry> = Lazy::new(AgentRegistry::builtin);

/// Process-wide built-in registry, constructed once on first use.
pub fn builtin_registry() -> &'static AgentRegistry {
    &BUILTIN
}

impl AgentRegistry {
    /// The built-in personas. Order here is the order shown to users.
    pub fn builtin() -> Self {
        let agents = vec![
            Agent::new(
                "Paris Tourist Guide",
                "The image shows a site in Paris. Describe the image like a \
                 excited tourist guide. Give a short answer.",
                DEFAULT_VOICE,
            ),
            Agent::new(
                "Sighted Guide",
                "You are sighted guide for a visually impaired individual.\n\
                 Concisely describe any potential dangers or hazards present \
                 in the image.",
                DEFAULT_VOICE,
            ),
            Agent::new(
                "Soccer Commentary",
                "You are commentating on a soccer match.\n\
                 Respond with one or two excited statements.",
                DEFAULT_VOICE,
            ),
        ];
        Self { agents }
    }

    /// All persona names in stable declaration order.
    pub fn list_agents(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name.as_str()).collect()
    }

    /// Look up a persona by name. Unknown names are a usage error, not
    /// something end users can produce from the enumerated choices.
    pub fn get_agent(&self, name: &str) -> Result<&Agent, SightSpeakError> {
        self.agents
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| SightSpeakError::UnknownAgent(name.to_string()))
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
