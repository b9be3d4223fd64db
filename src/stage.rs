//! The six fixed CLEARTHINK analysis stages.
//!
//! The service runs its agents in a fixed pipeline order and the client
//! mirrors that order everywhere: progress labeling, section rendering,
//! export. Stage metadata (emoji, hint, description) is display-only; the
//! authoritative agent name still comes from the response payload.

/// Number of stages in the analysis pipeline.
pub const STAGE_COUNT: usize = 6;

/// One of the six fixed analysis stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentStage {
    ProblemFraming,
    OptionGenerator,
    AssumptionDetector,
    SecondOrderThinking,
    BiasDetection,
    DecisionSummary,
}

impl AgentStage {
    /// All stages in pipeline order.
    pub const ALL: [AgentStage; STAGE_COUNT] = [
        AgentStage::ProblemFraming,
        AgentStage::OptionGenerator,
        AgentStage::AssumptionDetector,
        AgentStage::SecondOrderThinking,
        AgentStage::BiasDetection,
        AgentStage::DecisionSummary,
    ];

    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Stage at a pipeline position.
    pub fn from_index(index: usize) -> Option<AgentStage> {
        Self::ALL.get(index).copied()
    }

    /// Stage matching an agent name from the wire, if it is one of the six.
    pub fn for_name(name: &str) -> Option<AgentStage> {
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgentStage::ProblemFraming => "Problem Framing",
            AgentStage::OptionGenerator => "Option Generator",
            AgentStage::AssumptionDetector => "Assumption Detector",
            AgentStage::SecondOrderThinking => "Second-Order Thinking",
            AgentStage::BiasDetection => "Bias Detection",
            AgentStage::DecisionSummary => "Decision Summary",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            AgentStage::ProblemFraming => "🎯",
            AgentStage::OptionGenerator => "💡",
            AgentStage::AssumptionDetector => "🔍",
            AgentStage::SecondOrderThinking => "🔮",
            AgentStage::BiasDetection => "🧠",
            AgentStage::DecisionSummary => "✅",
        }
    }

    /// Working message shown while the simulator points at this stage.
    pub fn hint(&self) -> &'static str {
        match self {
            AgentStage::ProblemFraming => {
                "Clarifying your decision into a clear problem statement..."
            }
            AgentStage::OptionGenerator => {
                "Generating realistic options with honest trade-offs..."
            }
            AgentStage::AssumptionDetector => "Finding hidden assumptions in your thinking...",
            AgentStage::SecondOrderThinking => "Exploring what happens next in each scenario...",
            AgentStage::BiasDetection => "Checking for cognitive biases...",
            AgentStage::DecisionSummary => "Synthesizing everything into clear guidance...",
        }
    }

    /// One-line summary shown under the agent name in the report.
    pub fn description(&self) -> &'static str {
        match self {
            AgentStage::ProblemFraming => {
                "Transforms messy input into structured problem definition"
            }
            AgentStage::OptionGenerator => "Creates actionable options with pros and cons",
            AgentStage::AssumptionDetector => {
                "Identifies facts, beliefs, and fears affecting your decision"
            }
            AgentStage::SecondOrderThinking => "Analyzes consequences of success and failure",
            AgentStage::BiasDetection => "Detects and gently explains thinking biases",
            AgentStage::DecisionSummary => {
                "Final recommendation with confidence level and next steps"
            }
        }
    }

    /// Description for an arbitrary agent name from the wire.
    ///
    /// Unknown names fall back to an empty string rather than an error so a
    /// renamed or extra agent still renders.
    pub fn description_for(name: &str) -> &'static str {
        Self::for_name(name).map(|s| s.description()).unwrap_or("")
    }
}
