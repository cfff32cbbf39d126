//! Analysis prompt assembly
//!
//! Prompts are pure string assembly: a shared preamble, context blocks built from the
//! supplied entities, and the fixed instruction template of the requested step. No
//! analysis is executed here.
//!
//! - `steps`: instruction templates of the nine workflow steps
//! - `persona`: analyst personas and their system prompt

mod persona;
mod steps;

pub use persona::{Persona, PersonaProfile};

use crate::error::{ReportError, Result};
use crate::report::ArtifactKind;
use lens_core::{Company, FinancialRecord, Segment};
use lens_prompt::{Language, PromptBuilder, PromptRegistry};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Financial rows included in a prompt
pub const PROMPT_FINANCIAL_ROWS: usize = 4;

/// Step of the analysis workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Overview,
    QualityCheck,
    Financials,
    Qualitative,
    Valuation,
    Rating,
    Technical,
    Strategy,
    Execution,
}

impl StepType {
    /// Workflow order
    pub const ALL: [StepType; 9] = [
        StepType::Overview,
        StepType::QualityCheck,
        StepType::Financials,
        StepType::Qualitative,
        StepType::Valuation,
        StepType::Rating,
        StepType::Technical,
        StepType::Strategy,
        StepType::Execution,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            StepType::Overview => "overview",
            StepType::QualityCheck => "quality_check",
            StepType::Financials => "financials",
            StepType::Qualitative => "qualitative",
            StepType::Valuation => "valuation",
            StepType::Rating => "rating",
            StepType::Technical => "technical",
            StepType::Strategy => "strategy",
            StepType::Execution => "execution",
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            StepType::Overview => "analysis.step.overview",
            StepType::QualityCheck => "analysis.step.quality_check",
            StepType::Financials => "analysis.step.financials",
            StepType::Qualitative => "analysis.step.qualitative",
            StepType::Valuation => "analysis.step.valuation",
            StepType::Rating => "analysis.step.rating",
            StepType::Technical => "analysis.step.technical",
            StepType::Strategy => "analysis.step.strategy",
            StepType::Execution => "analysis.step.execution",
        }
    }

    /// Dashboard title of the step
    pub fn title(&self) -> &'static str {
        match self {
            StepType::Overview => "1단계: 기본 정보 및 개요",
            StepType::QualityCheck => "1.5단계: 데이터 품질 검증",
            StepType::Financials => "2단계: 재무 및 팩터 분석",
            StepType::Qualitative => "3단계: 정성적 분석 (SWOT/ESG)",
            StepType::Valuation => "4단계: 밸류에이션 (다중 방식)",
            StepType::Rating => "5단계: 투자 매력도 평가",
            StepType::Technical => "6단계: 기술적 분석",
            StepType::Strategy => "7단계: 투자 전략 수립",
            StepType::Execution => "8단계: 자금 관리 및 실행",
        }
    }

    /// Artifact the user attaches alongside this step's prompt
    pub fn attachment(&self) -> Option<ArtifactKind> {
        match self {
            StepType::Overview | StepType::QualityCheck => Some(ArtifactKind::Overview),
            StepType::Qualitative => Some(ArtifactKind::Narratives),
            StepType::Technical => Some(ArtifactKind::Chart),
            _ => None,
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StepType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|step| step.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReportError::UnknownStep(s.to_string()))
    }
}

/// Register the preamble, every step template and the persona prompt
pub fn register_prompts(registry: &PromptRegistry) -> lens_prompt::Result<()> {
    registry.register(steps::preamble()?);
    registry.register(steps::overview()?);
    registry.register(steps::quality_check()?);
    registry.register(steps::financials()?);
    registry.register(steps::qualitative()?);
    registry.register(steps::valuation()?);
    registry.register(steps::rating()?);
    registry.register(steps::technical()?);
    registry.register(steps::strategy()?);
    registry.register(steps::execution()?);
    registry.register(persona::persona_system()?);
    Ok(())
}

/// Renders analysis and persona prompts from a registry of templates
#[derive(Debug)]
pub struct AnalysisPromptBuilder {
    registry: PromptRegistry,
}

impl AnalysisPromptBuilder {
    /// Builder rendering English prompts
    pub fn new() -> Result<Self> {
        Self::with_language(Language::English)
    }

    pub fn with_language(lang: Language) -> Result<Self> {
        let registry = PromptRegistry::new(lang);
        register_prompts(&registry)?;
        Ok(Self { registry })
    }

    pub fn language(&self) -> Language {
        self.registry.language().clone()
    }

    /// Prompt for one step from the company, its latest financials and its segments
    ///
    /// At most [`PROMPT_FINANCIAL_ROWS`] financial rows are used, newest first. The
    /// segment block is left out entirely when there are no segments.
    pub fn build(
        &self,
        step: StepType,
        company: &Company,
        financials: &[FinancialRecord],
        segments: &[Segment],
    ) -> Result<String> {
        for record in financials {
            record.validate()?;
        }

        let vars = json!({
            "name": company.name,
            "ticker": company.ticker,
            "company": company_block(company),
            "financials": financial_block(financials),
            "segments": segment_block(segments),
        });

        let preamble = self.registry.render("analysis.preamble", &vars)?;
        let body = self.registry.render(step.template_name(), &vars)?;
        tracing::debug!(ticker = %company.ticker, step = %step, "Built analysis prompt");
        Ok(preamble + &body)
    }

    /// Korean system prompt for `persona`
    pub fn persona(&self, persona: Persona) -> Result<String> {
        let profile = persona.profile();
        let vars = json!({
            "name": profile.name,
            "focus": profile.focus,
            "tone": profile.tone,
            "mission": profile.mission,
        });
        Ok(self
            .registry
            .render_in("analysis.persona", &Language::Korean, &vars)?)
    }
}

/// [`AnalysisPromptBuilder::build`] with English templates
///
/// # Examples
///
/// ```
/// use lens_core::Company;
/// use lens_report::{StepType, build_prompt};
///
/// let company = Company::new("005930", "삼성전자");
/// let prompt = build_prompt(StepType::Strategy, &company, &[], &[]).unwrap();
///
/// assert!(prompt.starts_with(
///     "Act as a professional financial analyst. Analyze the following company: 삼성전자 (005930)."
/// ));
/// assert!(prompt.contains("Task: Propose investment strategies"));
/// ```
pub fn build_prompt(
    step: StepType,
    company: &Company,
    financials: &[FinancialRecord],
    segments: &[Segment],
) -> Result<String> {
    AnalysisPromptBuilder::new()?.build(step, company, financials, segments)
}

/// [`AnalysisPromptBuilder::persona`] without keeping a builder around
pub fn persona_prompt(persona: Persona) -> Result<String> {
    AnalysisPromptBuilder::new()?.persona(persona)
}

fn dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn company_block(company: &Company) -> String {
    PromptBuilder::new()
        .text("[Target Company]\n")
        .text(format!("Name: {} ({})\n", company.name, company.ticker))
        .field("Sector", dash(company.sector.as_deref()))
        .field("Summary", dash(company.desc_summary.as_deref()))
        .newline()
        .build()
}

fn financial_block(financials: &[FinancialRecord]) -> String {
    let mut rows: Vec<&FinancialRecord> = financials.iter().collect();
    rows.sort_by(|a, b| b.year.cmp(&a.year).then(b.quarter.cmp(&a.quarter)));
    rows.truncate(PROMPT_FINANCIAL_ROWS);

    PromptBuilder::new()
        .text("[Financial Highlights (Recent)]\n")
        .each(rows, |f| {
            format!(
                "Year: {}, Quarter: {}, Revenue: {}, Op Profit: {}, Net Income: {}, R&D: {}\n",
                f.year,
                f.quarter,
                dash(f.revenue),
                dash(f.op_profit),
                dash(f.net_income),
                f.rnd_expenses.unwrap_or(0)
            )
        })
        .newline()
        .build()
}

fn segment_block(segments: &[Segment]) -> String {
    PromptBuilder::new()
        .when(!segments.is_empty(), "[Segment Performance]\n")
        .each(segments, |s| {
            format!(
                "Period: {}, Division: {}, Revenue: {}, Op Profit: {}\n",
                s.period,
                s.division,
                dash(s.revenue),
                dash(s.op_profit)
            )
        })
        .when(!segments.is_empty(), "\n")
        .build()
}
