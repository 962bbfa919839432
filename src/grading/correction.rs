use regex::Regex;

/// Placeholder corrections applied in order. There is no correction service behind
/// this; it rewrites a handful of plain forms into their honorific versions.
const REPLACEMENTS: [(&str, &str); 4] = [
    ("할머니가", "할머니께서"),
    ("아프다", "아프시다"),
    ("병원에 간다", "병원에 가야 합니다"),
    ("통증이 심하다", "통증이 심하십니다"),
];

lazy_static::lazy_static! {
    static ref RULES: Vec<(Regex, &'static str)> = REPLACEMENTS
        .iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(&regex::escape(pattern))
                .ok()
                .map(|re| (re, *replacement))
        })
        .collect();
}

pub fn mock_correction(message: &str) -> String {
    let mut corrected = message.to_string();
    for (re, replacement) in RULES.iter() {
        corrected = re.replace_all(&corrected, *replacement).into_owned();
    }
    if corrected.is_empty() {
        message.to_string()
    } else {
        corrected
    }
}

/// Fixed reviewer comment shown next to the corrected message.
pub fn feedback_comment(language: FeedbackLanguage) -> &'static str {
    match language {
        FeedbackLanguage::Korean => {
            "높임말과 공손한 표현을 잘 사용했습니다. 더 자연스러운 한국어 표현으로 다듬었습니다."
        }
        FeedbackLanguage::Vietnamese => {
            "Bạn đã sử dụng kính ngữ và cách diễn đạt lịch sự rất tốt. Đã được cải thiện thành cách diễn đạt tiếng Hàn tự nhiên hơn."
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackLanguage {
    #[default]
    Korean,
    Vietnamese,
}

impl FeedbackLanguage {
    pub fn toggle(self) -> Self {
        match self {
            FeedbackLanguage::Korean => FeedbackLanguage::Vietnamese,
            FeedbackLanguage::Vietnamese => FeedbackLanguage::Korean,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedbackLanguage::Korean => "한국어",
            FeedbackLanguage::Vietnamese => "Tiếng Việt",
        }
    }
}
