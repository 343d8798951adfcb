//! Workflow session state for one guided interaction.
//!
//! The guided workflow advances request -> strategy -> PTPF -> LanternHive ->
//! FLUX code, and every field is write-once in that order. The session is an
//! explicit value threaded through the workflow handlers; restarting the
//! workflow drops the session and builds a fresh one. Nothing here persists
//! across runs.

use crate::errors::{FluxError, FluxResult};
use crate::templates::StrategyTag;
use crate::types::{LanternResponse, PtpfResponse};

/// How the FLUX template will be chosen for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyChoice {
    /// An explicit strategy tag selected by the user
    Strategy(StrategyTag),
    /// No tag; the template selector falls back to keyword dispatch
    Auto,
}

impl StrategyChoice {
    pub fn tag(&self) -> Option<StrategyTag> {
        match self {
            StrategyChoice::Strategy(tag) => Some(*tag),
            StrategyChoice::Auto => None,
        }
    }
}

/// In-memory state for one guided workflow interaction
#[derive(Debug, Clone)]
pub struct WorkflowSession {
    request: String,
    strategy: Option<StrategyChoice>,
    ptpf_result: Option<PtpfResponse>,
    lanternhive_result: Option<LanternResponse>,
    flux_code: Option<String>,
}

impl WorkflowSession {
    /// Starts a session from the user's request text.
    ///
    /// Empty or whitespace-only requests are rejected here, before any
    /// network call is made.
    pub fn new(request: impl Into<String>) -> FluxResult<Self> {
        let request = request.into();
        if request.trim().is_empty() {
            return Err(FluxError::ValidationError(
                "Please describe what you want to do".to_string(),
            ));
        }

        Ok(Self {
            request,
            strategy: None,
            ptpf_result: None,
            lanternhive_result: None,
            flux_code: None,
        })
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn strategy(&self) -> Option<StrategyChoice> {
        self.strategy
    }

    pub fn ptpf_result(&self) -> Option<&PtpfResponse> {
        self.ptpf_result.as_ref()
    }

    pub fn lanternhive_result(&self) -> Option<&LanternResponse> {
        self.lanternhive_result.as_ref()
    }

    pub fn flux_code(&self) -> Option<&str> {
        self.flux_code.as_deref()
    }

    /// Records the strategy selection. Write-once.
    pub fn select_strategy(&mut self, choice: StrategyChoice) -> FluxResult<()> {
        if self.strategy.is_some() {
            return Err(FluxError::StateError(
                "strategy is already selected for this session".to_string(),
            ));
        }
        self.strategy = Some(choice);
        Ok(())
    }

    /// Attaches the PTPF generation result. Requires a selected strategy.
    pub fn attach_ptpf(&mut self, result: PtpfResponse) -> FluxResult<()> {
        if self.strategy.is_none() {
            return Err(FluxError::StateError(
                "cannot attach PTPF result before a strategy is selected".to_string(),
            ));
        }
        if self.ptpf_result.is_some() {
            return Err(FluxError::StateError(
                "PTPF result is already attached to this session".to_string(),
            ));
        }
        self.ptpf_result = Some(result);
        Ok(())
    }

    /// Attaches the LanternHive analysis. Requires an attached PTPF result.
    pub fn attach_analysis(&mut self, result: LanternResponse) -> FluxResult<()> {
        if self.ptpf_result.is_none() {
            return Err(FluxError::StateError(
                "cannot attach analysis before the PTPF result".to_string(),
            ));
        }
        if self.lanternhive_result.is_some() {
            return Err(FluxError::StateError(
                "analysis is already attached to this session".to_string(),
            ));
        }
        self.lanternhive_result = Some(result);
        Ok(())
    }

    /// Attaches the selected FLUX code. Requires an attached analysis.
    pub fn attach_flux_code(&mut self, code: impl Into<String>) -> FluxResult<()> {
        if self.lanternhive_result.is_none() {
            return Err(FluxError::StateError(
                "cannot attach FLUX code before the analysis".to_string(),
            ));
        }
        if self.flux_code.is_some() {
            return Err(FluxError::StateError(
                "FLUX code is already attached to this session".to_string(),
            ));
        }
        self.flux_code = Some(code.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ptpf() -> PtpfResponse {
        PtpfResponse {
            success: true,
            ..Default::default()
        }
    }

    fn analysis() -> LanternResponse {
        LanternResponse {
            final_response: Some("analysis".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_request_is_rejected() {
        assert!(WorkflowSession::new("").is_err());
        assert!(WorkflowSession::new("   \n").is_err());
        assert!(WorkflowSession::new("build a thing").is_ok());
    }

    #[test]
    fn steps_advance_in_order() {
        let mut session = WorkflowSession::new("set up a login system").unwrap();
        session
            .select_strategy(StrategyChoice::Strategy(StrategyTag::DecomposeProblem))
            .unwrap();
        session.attach_ptpf(ptpf()).unwrap();
        session.attach_analysis(analysis()).unwrap();
        session.attach_flux_code("// code").unwrap();

        assert_eq!(session.flux_code(), Some("// code"));
        assert!(session.ptpf_result().unwrap().success);
    }

    #[test]
    fn ptpf_before_strategy_is_an_invalid_transition() {
        let mut session = WorkflowSession::new("do something").unwrap();
        assert!(matches!(
            session.attach_ptpf(ptpf()),
            Err(FluxError::StateError(_))
        ));
    }

    #[test]
    fn analysis_before_ptpf_is_an_invalid_transition() {
        let mut session = WorkflowSession::new("do something").unwrap();
        session.select_strategy(StrategyChoice::Auto).unwrap();
        assert!(matches!(
            session.attach_analysis(analysis()),
            Err(FluxError::StateError(_))
        ));
    }

    #[test]
    fn fields_are_write_once() {
        let mut session = WorkflowSession::new("do something").unwrap();
        session.select_strategy(StrategyChoice::Auto).unwrap();
        assert!(session.select_strategy(StrategyChoice::Auto).is_err());

        session.attach_ptpf(ptpf()).unwrap();
        assert!(session.attach_ptpf(ptpf()).is_err());
    }

    #[test]
    fn auto_choice_has_no_tag() {
        assert_eq!(StrategyChoice::Auto.tag(), None);
        assert_eq!(
            StrategyChoice::Strategy(StrategyTag::MetaLearning).tag(),
            Some(StrategyTag::MetaLearning)
        );
    }
}
