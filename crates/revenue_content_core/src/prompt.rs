//! crates/revenue_content_core/src/prompt.rs
//!
//! Prompt and fixed-copy templates. Inputs are embedded verbatim; callers are
//! expected to have sanitized them at the request boundary.

/// Instructions sent to the AI for one article.
pub fn build_prompt(topic: &str, keyword: &str) -> String {
    format!(
        "다음 주제로 검색엔진 최적화된 블로그 글을 작성해주세요.

주제: {topic}
타겟 키워드: {keyword}

요구사항:
1. 정확히 3개의 소제목(H2)만 사용
2. 각 소제목은 타겟 키워드를 자연스럽게 포함
3. 총 단어 수: 1500-2000자
4. 서론, 본론(3개 섹션), 결론 구조
5. 네이버, 구글, 빙 검색 최적화
6. 자연스러운 키워드 밀도 (2-3%)
7. 독자에게 가치를 제공하는 실용적 정보
8. 마지막에 CTA(Call-to-Action) 포함

형식:
- 매력적인 제목 (60자 이내)
- 소제목은 ## 마크다운 사용
- 단락은 3-4문장으로 구성
- 리스트는 자연스럽게 활용"
    )
}

/// A post title to offer when the editor has not written one yet.
pub fn suggest_title(topic: &str, keyword: &str, year: i32) -> String {
    format!("{keyword} - {topic} | 완벽 가이드 {year}")
}

/// A fixed three-section article used when no AI model is configured.
///
/// It follows the same `#`/`##` layout the prompt asks for, so it flows
/// through the structurer like a real reply.
pub fn fallback_draft(topic: &str, keyword: &str) -> String {
    format!(
        "# {topic}: 완벽 가이드

## {keyword}란 무엇인가?
{keyword}에 대해 알아보시나요? 이 글에서는 {keyword}에 대한 모든 것을 상세히 다룹니다.
{keyword}는 많은 분들이 관심을 갖고 있는 주제입니다. 전문가들의 의견과 최신 연구 결과를 바탕으로 정확한 정보를 제공합니다.

## {keyword}의 핵심 포인트
성공적인 결과를 위해서는 올바른 방법을 아는 것이 중요합니다. 검증된 방법들을 단계별로 소개합니다.

## {keyword} 실천 방법
실제로 적용할 수 있는 구체적인 방법들을 알아봅니다. 초보자도 쉽게 따라할 수 있는 실용적인 팁을 제공합니다.
지금 바로 시작해보세요!"
    )
}
