//! Built-in profession data.

use super::profession::{BudgetFormula, BudgetTerm, ProfessionDefinition, ProfessionId};
use super::slot::{SkillPool, SkillSlot};
use crate::value_objects::Characteristic;

/// Free-text specialty categories.
pub const PERSONAL_SPECIALTY: &str = "個人專長";
pub const ACADEMIC_SPECIALTY: &str = "學術專長";
pub const FIELD_OF_STUDY: &str = "研讀領域";

/// Label of the interpersonal pool.
pub const INTERPERSONAL: &str = "人際技能";

/// The interpersonal pool shared by every "人際技能" slot.
pub fn interpersonal_pool() -> SkillPool {
    SkillPool::new(INTERPERSONAL, ["魅力", "威脅", "話術", "說服"])
}

fn profession(id: &str, budget: BudgetFormula, slots: Vec<SkillSlot>) -> ProfessionDefinition {
    ProfessionDefinition::new(ProfessionId(id.to_string()), budget, slots)
}

fn edu_times_four() -> BudgetFormula {
    BudgetFormula::new().plus(BudgetTerm::single(Characteristic::Edu, 4))
}

fn edu_plus_dex_or_str() -> BudgetFormula {
    BudgetFormula::new()
        .plus(BudgetTerm::single(Characteristic::Edu, 2))
        .plus(BudgetTerm::best_of(
            [Characteristic::Dex, Characteristic::Str],
            2,
        ))
}

/// All built-in professions, in presentation order.
pub(super) fn professions() -> Vec<ProfessionDefinition> {
    vec![
        profession(
            "會計師",
            edu_times_four(),
            vec![
                SkillSlot::literal("會計"),
                SkillSlot::literal("法律"),
                SkillSlot::literal("圖書館使用"),
                SkillSlot::literal("聆聽"),
                SkillSlot::literal("說服"),
                SkillSlot::literal("識破"),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
            ],
        ),
        profession(
            "制服警察",
            BudgetFormula::new()
                .plus(BudgetTerm::single(Characteristic::Edu, 2))
                .plus(BudgetTerm::single(Characteristic::Dex, 2)),
            vec![
                SkillSlot::literal("戰鬥(空手)"),
                SkillSlot::literal("火器"),
                SkillSlot::literal("急救"),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::literal("法律"),
                SkillSlot::literal("心理學"),
                SkillSlot::literal("識破"),
                SkillSlot::choose_one("開車", ["騎術"]),
            ],
        ),
        profession(
            "律師",
            edu_times_four(),
            vec![
                SkillSlot::literal("會計"),
                SkillSlot::literal("法律"),
                SkillSlot::literal("圖書館使用"),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::literal("心理學"),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
            ],
        ),
        profession(
            "私家偵探",
            edu_plus_dex_or_str(),
            vec![
                SkillSlot::literal("藝術與手藝(攝影)"),
                SkillSlot::literal("喬裝"),
                SkillSlot::literal("法律"),
                SkillSlot::literal("圖書館使用"),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::literal("心理學"),
                SkillSlot::literal("識破"),
                SkillSlot::choose_one("鎖匠", ["火器"]),
            ],
        ),
        profession(
            "運動員",
            edu_plus_dex_or_str(),
            vec![
                SkillSlot::literal("攀爬"),
                SkillSlot::literal("跳躍"),
                SkillSlot::literal("戰鬥(空手)"),
                SkillSlot::literal("騎術"),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::literal("游泳"),
                SkillSlot::literal("投擲"),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
            ],
        ),
        profession(
            "古董商",
            edu_times_four(),
            vec![
                SkillSlot::literal("估價"),
                SkillSlot::literal("藝術與手藝"),
                SkillSlot::literal("歷史"),
                SkillSlot::literal("圖書館使用"),
                SkillSlot::literal("其他語言"),
                SkillSlot::categorical(interpersonal_pool()),
                SkillSlot::literal("識破"),
                SkillSlot::custom_text(PERSONAL_SPECIALTY),
            ],
        ),
        profession(
            "教授",
            edu_times_four(),
            vec![
                SkillSlot::literal("圖書館使用"),
                SkillSlot::literal("其他語言"),
                SkillSlot::literal("母語"),
                SkillSlot::literal("心理學"),
                SkillSlot::custom_text(ACADEMIC_SPECIALTY),
                SkillSlot::custom_text(ACADEMIC_SPECIALTY),
                SkillSlot::custom_text(ACADEMIC_SPECIALTY),
                SkillSlot::custom_text(ACADEMIC_SPECIALTY),
            ],
        ),
        profession(
            "醫生",
            edu_times_four(),
            vec![
                SkillSlot::literal("急救"),
                SkillSlot::literal("其他語言(拉丁文)"),
                SkillSlot::literal("醫學"),
                SkillSlot::literal("心理學"),
                SkillSlot::literal("科學(生物學)"),
                SkillSlot::literal("科學(藥學)"),
                SkillSlot::custom_text(FIELD_OF_STUDY),
                SkillSlot::custom_text(FIELD_OF_STUDY),
            ],
        ),
    ]
}
