//! Study recommendations for a session or a history.

use serde::{Deserialize, Serialize};

use crate::analysis::{EraTag, Locale, has_pressure_instability};

const HIGH_PAI: u8 = 80;
const HIGH_ACCURACY: u8 = 80;
const LOW_ACCURACY: u8 = 60;

/// One recommendation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    HighPerformance,
    BackToBasics,
    SteadyProgress,
    ReduceCarelessMistakes,
    CloseKnowledgeGap,
    TrainUnderPressure,
    FocusWeakTopic { topic: String, grade: u8 },
}

impl Recommendation {
    pub fn text(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::HighPerformance, Locale::Kk) => "Жалпы нәтиже жоғары. Қиынырақ деңгейдегі есептерге және олимпиадалық форматқа біртіндеп өту ұсынылады.".into(),
            (Self::HighPerformance, Locale::En) => "Strong overall results. Move gradually to harder problems and olympiad-style formats.".into(),
            (Self::BackToBasics, Locale::Kk) => "Негізгі тақырыптар бойынша түсінікті күшейту үшін базалық есептерді жиі қайталау қажет.".into(),
            (Self::BackToBasics, Locale::En) => "Revisit the core topics and practise basic problems more often.".into(),
            (Self::SteadyProgress, Locale::Kk) => "Жалпы жетістік орташа деңгейде. Күрделілікті баяу арттыра отырып, әлсіз тақырыптарға қосымша уақыт бөлген дұрыс.".into(),
            (Self::SteadyProgress, Locale::En) => "Average overall progress. Raise difficulty slowly and give weak topics extra time.".into(),
            (Self::ReduceCarelessMistakes, Locale::Kk) => "Ұқыпсыз қателерді азайту үшін есепті жібермес бұрын қысқа тексеру чек-листін қолдану ұсынылады.".into(),
            (Self::ReduceCarelessMistakes, Locale::En) => "Use a short checklist to re-check each answer before submitting.".into(),
            (Self::CloseKnowledgeGap, Locale::Kk) => "Бірнеше рет қатарынан қателер болған тақырыптарда теорияны қайта қарап, қарапайымнан күрделіге қарай есептерді шешкен жөн.".into(),
            (Self::CloseKnowledgeGap, Locale::En) => "Review the theory behind repeated misses and work from simple to harder problems.".into(),
            (Self::TrainUnderPressure, Locale::Kk) => "Уақыт қысымында жауаптардың тұрақсыздығы байқалады. Таймермен жаттығу және уақытты бөлу стратегияларын қолдану маңызды.".into(),
            (Self::TrainUnderPressure, Locale::En) => "Answers become unstable under time pressure. Practise with a timer and plan time per question.".into(),
            (Self::FocusWeakTopic { topic, grade }, Locale::Kk) => format!(
                "Әлсіз тақырып: «{topic}» ({grade}-сынып). Осы бөлім бойынша жеке жаттығу сессияларын жоспарлаған дұрыс."
            ),
            (Self::FocusWeakTopic { topic, grade }, Locale::En) => format!(
                "Weak topic: \"{topic}\" (grade {grade}). Plan dedicated practice sessions for it."
            ),
        }
    }
}

/// Build the ordered recommendation list.
///
/// One overall line first, then one per ERA family present in the stored
/// summary, then the weak-topic focus.
pub fn recommendations(
    pai: u8,
    accuracy: u8,
    era_summary: &str,
    weak_topic: Option<(&str, u8)>,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    out.push(if pai >= HIGH_PAI && accuracy >= HIGH_ACCURACY {
        Recommendation::HighPerformance
    } else if accuracy < LOW_ACCURACY {
        Recommendation::BackToBasics
    } else {
        Recommendation::SteadyProgress
    });

    let era = era_summary.to_lowercase();
    let mentions = |tag: EraTag| era.contains(&tag.label().to_lowercase());
    if mentions(EraTag::CarelessMistakes) {
        out.push(Recommendation::ReduceCarelessMistakes);
    }
    if mentions(EraTag::KnowledgeGap) {
        out.push(Recommendation::CloseKnowledgeGap);
    }
    if has_pressure_instability(era_summary) {
        out.push(Recommendation::TrainUnderPressure);
    }

    if let Some((topic, grade)) = weak_topic {
        out.push(Recommendation::FocusWeakTopic {
            topic: topic.to_string(),
            grade,
        });
    }
    out
}
