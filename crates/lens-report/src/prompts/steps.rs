//! Instruction templates of the analysis workflow
//!
//! Every step template receives three pre-rendered context blocks (`company`,
//! `financials`, `segments`) and places only the ones it uses. Empty blocks render as
//! nothing.

use lens_prompt::{JinjaTemplate, Result};

/// Opening line shared by all steps
pub fn preamble() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.preamble",
        "Act as a professional financial analyst. Analyze the following company: {{ name }} ({{ ticker }}).\n\n",
        "전문 금융 애널리스트로서 다음 기업을 분석하세요: {{ name }} ({{ ticker }}).\n\n",
    )
}

pub fn overview() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.overview",
        "{{ company }}{{ segments }}Task: Analyze the business overview.\n\
         - Analyze revenue mix by major business segments (recent 3 years trend).\n\
         - Identify key product/service portfolio and market share.\n\
         - Analyze major competitors and competitive advantages.\n\
         - Check supply chain structure and dependency on key clients.\n\
         Output Format: Markdown table + 3-line key summary.",
        "{{ company }}{{ segments }}과제: 사업 개요를 분석하세요.\n\
         - 주요 사업 부문별 매출 구성을 분석하세요 (최근 3년 추이).\n\
         - 핵심 제품/서비스 포트폴리오와 시장 점유율을 파악하세요.\n\
         - 주요 경쟁사와 경쟁 우위를 분석하세요.\n\
         - 공급망 구조와 주요 고객사 의존도를 점검하세요.\n\
         출력 형식: 마크다운 표 + 3줄 핵심 요약.",
    )
}

pub fn quality_check() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.quality_check",
        "{{ company }}{{ financials }}Task: Verify financial data quality and adjust for corporate events.\n\
         1) Check for adjusted stock price reflection (dividend, split, bonus issue).\n\
         2) Verify quarterly data connectivity (audit opinion, base date).\n\
         3) Analyze cash flow persistence (operating cash flow anomalies).\n\
         4) Identify non-financial issues (litigation, regulation, environment).\n\
         Output Format: Verification results + Adjusted metrics table + Notes.",
        "{{ company }}{{ financials }}과제: 재무 데이터 품질을 검증하고 기업 이벤트를 반영해 조정하세요.\n\
         1) 수정주가 반영 여부를 확인하세요 (배당, 액면분할, 무상증자).\n\
         2) 분기 데이터 연결성을 검증하세요 (감사의견, 기준일).\n\
         3) 현금흐름의 지속성을 분석하세요 (영업활동 현금흐름 이상치).\n\
         4) 비재무적 이슈를 파악하세요 (소송, 규제, 환경).\n\
         출력 형식: 검증 결과 + 조정 지표 표 + 비고.",
    )
}

pub fn financials() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.financials",
        "{{ company }}{{ financials }}{{ segments }}Task: Analyze financials and factor exposure.\n\
         Financial Analysis (Recent 5 years/quarters):\n\
         1) Performance Trend: Revenue, Op Profit, Net Income (YoY Growth)\n\
         2) Profitability: OPM, ROE, ROA, EBITDA Margin\n\
         3) Stability: Debt Ratio, Current Ratio, Net Debt Ratio\n\
         4) Growth: Revenue Growth, CAPEX/Revenue, R&D/Revenue\n\
         Factor Analysis: Exposure to SMB, HML, RMW, CMA, UMD.\n\
         Output Format: Metrics table + 1-sentence summary vs industry peers.",
        "{{ company }}{{ financials }}{{ segments }}과제: 재무와 팩터 노출도를 분석하세요.\n\
         재무 분석 (최근 5개 연도/분기):\n\
         1) 실적 추이: 매출, 영업이익, 순이익 (전년 대비 성장률)\n\
         2) 수익성: 영업이익률, ROE, ROA, EBITDA 마진\n\
         3) 안정성: 부채비율, 유동비율, 순차입금비율\n\
         4) 성장성: 매출 성장률, CAPEX/매출, R&D/매출\n\
         팩터 분석: SMB, HML, RMW, CMA, UMD 노출도.\n\
         출력 형식: 지표 표 + 동종업계 대비 1문장 요약.",
    )
}

pub fn qualitative() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.qualitative",
        "{{ company }}Task: Perform qualitative analysis (SWOT + News + ESG).\n\
         1) SWOT Analysis: Strengths, Weaknesses, Opportunities, Threats (with quantitative basis).\n\
         2) Recent News/Policy: Gov policy impact, regulation changes, competitor trends.\n\
         3) ESG Risk: Environmental costs, Social issues, Governance risks.\n\
         4) Alternative Data: Social sentiment, Analyst report tone changes.\n\
         Note: Use the provided 'Narratives.md' content for deep analysis.\n\
         Output Format: Markdown table per section + Comprehensive Risk Score (1-10).",
        "{{ company }}과제: 정성 분석을 수행하세요 (SWOT + 뉴스 + ESG).\n\
         1) SWOT 분석: 강점, 약점, 기회, 위협 (정량적 근거 포함).\n\
         2) 최근 뉴스/정책: 정부 정책 영향, 규제 변화, 경쟁사 동향.\n\
         3) ESG 리스크: 환경 비용, 사회적 이슈, 지배구조 리스크.\n\
         4) 대체 데이터: 소셜 여론, 애널리스트 리포트 논조 변화.\n\
         참고: 심층 분석에는 제공된 'Narratives.md' 내용을 활용하세요.\n\
         출력 형식: 항목별 마크다운 표 + 종합 리스크 점수 (1-10).",
    )
}

pub fn valuation() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.valuation",
        "{{ company }}{{ financials }}Task: Perform multi-valuation and reflect policy scenarios.\n\
         Methods (6 types): PER, PBR, PSR, PEG, EV/EBITDA, DCF.\n\
         Scenarios:\n\
         - Base: Current policy\n\
         - Enhanced: Policy support expanded (Rev +15%)\n\
         - Strong: Super strong policy (Rev +30%)\n\
         Assumptions: WACC, Terminal Growth, Risk Premium.\n\
         Output Format: Fair value table by method + Range by scenario + Consensus Fair Value.",
        "{{ company }}{{ financials }}과제: 다중 밸류에이션을 수행하고 정책 시나리오를 반영하세요.\n\
         방법 (6가지): PER, PBR, PSR, PEG, EV/EBITDA, DCF.\n\
         시나리오:\n\
         - 기본: 현행 정책\n\
         - 강화: 정책 지원 확대 (매출 +15%)\n\
         - 초강력: 초강력 정책 (매출 +30%)\n\
         가정: WACC, 영구성장률, 위험 프리미엄.\n\
         출력 형식: 방법별 적정가치 표 + 시나리오별 범위 + 컨센서스 적정가치.",
    )
}

pub fn rating() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.rating",
        "{{ company }}{{ financials }}Task: Rate investment attractiveness (5 stars) and check behavioral biases.\n\
         Ratings:\n\
         1) Competitiveness & Growth\n\
         2) Stability & Profitability\n\
         3) Valuation Appeal\n\
         4) Policy Momentum\n\
         5) Overall Score\n\
         Bias Check: Confirmation bias, Loss aversion, Overconfidence.\n\
         Output Format: Star rating table + Summary + Bias checklist + Improvement plan.",
        "{{ company }}{{ financials }}과제: 투자 매력도를 별점(5점)으로 평가하고 행동 편향을 점검하세요.\n\
         평가 항목:\n\
         1) 경쟁력 및 성장성\n\
         2) 안정성 및 수익성\n\
         3) 밸류에이션 매력\n\
         4) 정책 모멘텀\n\
         5) 종합 점수\n\
         편향 점검: 확증 편향, 손실 회피, 과신.\n\
         출력 형식: 별점 표 + 요약 + 편향 체크리스트 + 개선 방안.",
    )
}

pub fn technical() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.technical",
        "Task: Cross-validate technical analysis with traditional indicators and ML models.\n\
         I have the market data (CSV). Based on the recent price trends:\n\
         1) Traditional: MA (20/60/120), RSI, MACD, Bollinger Bands, Support/Resistance.\n\
         2) ML Enhancement: Random Forest feature importance, LSTM prediction, Pattern recognition.\n\
         3) Comprehensive Signal: Buy/Sell/Neutral signal consistency, Trend strength (ADX).\n\
         Output Format: Signal table + ML results + Comprehensive Signal (Confidence %).",
        "과제: 전통적 지표와 ML 모델로 기술적 분석을 교차 검증하세요.\n\
         시장 데이터(CSV)가 첨부되어 있습니다. 최근 가격 추세를 바탕으로:\n\
         1) 전통적 지표: 이동평균 (20/60/120), RSI, MACD, 볼린저 밴드, 지지/저항.\n\
         2) ML 보강: 랜덤 포레스트 변수 중요도, LSTM 예측, 패턴 인식.\n\
         3) 종합 시그널: 매수/매도/중립 시그널 일관성, 추세 강도 (ADX).\n\
         출력 형식: 시그널 표 + ML 결과 + 종합 시그널 (신뢰도 %).",
    )
}

pub fn strategy() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.strategy",
        "{{ company }}Task: Propose investment strategies (Stable vs Aggressive) and analyze portfolio risk.\n\
         1) Stable Strategy: High win rate, strict entry/exit rules.\n\
         2) Aggressive Strategy: High return, momentum based.\n\
         3) Portfolio Risk: Volatility, Beta, Correlation, VaR contribution.\n\
         Output Format: Detailed plan table by strategy + Risk analysis table + Target investor profile.",
        "{{ company }}과제: 투자 전략(안정형 vs 공격형)을 제안하고 포트폴리오 리스크를 분석하세요.\n\
         1) 안정형 전략: 높은 승률, 엄격한 진입/청산 규칙.\n\
         2) 공격형 전략: 높은 수익률, 모멘텀 기반.\n\
         3) 포트폴리오 리스크: 변동성, 베타, 상관관계, VaR 기여도.\n\
         출력 형식: 전략별 세부 계획 표 + 리스크 분석 표 + 대상 투자자 유형.",
    )
}

pub fn execution() -> Result<JinjaTemplate> {
    JinjaTemplate::bilingual(
        "analysis.step.execution",
        "{{ company }}Task: Concretize investment strategy for [Amount] KRW capital and propose automation.\n\
         1) Weight Decision: Conservative/Neutral/Aggressive scenarios.\n\
         2) Split Buy Plan: 1st/2nd/3rd entry prices and amounts.\n\
         3) Stop/Profit Rules: Specific price levels and expected return.\n\
         4) Automation: Next.js + Supabase system design, Telegram alerts.\n\
         Output Format: Execution plan + System architecture diagram + Monitoring checklist.",
        "{{ company }}과제: [금액]원 자본에 대한 투자 전략을 구체화하고 자동화 방안을 제안하세요.\n\
         1) 비중 결정: 보수적/중립/공격적 시나리오.\n\
         2) 분할 매수 계획: 1차/2차/3차 진입 가격과 금액.\n\
         3) 손절/익절 규칙: 구체적 가격 수준과 기대 수익률.\n\
         4) 자동화: Next.js + Supabase 시스템 설계, 텔레그램 알림.\n\
         출력 형식: 실행 계획 + 시스템 아키텍처 다이어그램 + 모니터링 체크리스트.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_prompt::{Language, PromptTemplate};
    use serde_json::json;

    #[test]
    fn test_all_templates_parse_in_both_languages() {
        let templates = [
            preamble(),
            overview(),
            quality_check(),
            financials(),
            qualitative(),
            valuation(),
            rating(),
            technical(),
            strategy(),
            execution(),
        ];
        for template in templates {
            let template = template.unwrap();
            assert!(template.supports_language(&Language::English));
            assert!(template.supports_language(&Language::Korean));
        }
    }

    #[test]
    fn test_technical_ignores_context() {
        let out = technical()
            .unwrap()
            .render(&Language::English, &json!({ "company": "[Target Company]\n" }))
            .unwrap();
        assert!(out.starts_with("Task: Cross-validate"));
        assert!(!out.contains("[Target Company]"));
    }
}
