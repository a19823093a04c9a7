use std::collections::BTreeSet;

use super::domain::{Skill, ToolName, ToolOnSite};

/// Skills a team needs before it can safely use the given tool.
pub const fn skills_for_tool(tool: ToolName) -> &'static [Skill] {
    match tool {
        ToolName::Axe | ToolName::BowSaw => &[Skill::Lumberjack],
        ToolName::Ladder => &[Skill::Heights],
        ToolName::Paint
        | ToolName::PaintRoller
        | ToolName::CoverSheet
        | ToolName::MaskingTape
        | ToolName::PaintBrush
        | ToolName::ScraperGrid
        | ToolName::PainterSpatula
        | ToolName::JapaneseSpatula
        | ToolName::Gypsum => &[Skill::Artist],
        ToolName::Saw | ToolName::Chainsaw | ToolName::CircularSaw => &[Skill::Danger],
        ToolName::Brushcutter => &[Skill::Gardener],
        ToolName::Bucket
        | ToolName::Rag
        | ToolName::Broom
        | ToolName::Gloves
        | ToolName::Respirator
        | ToolName::Headphones
        | ToolName::Rake
        | ToolName::Shovel
        | ToolName::Pitchfork
        | ToolName::HedgeTrimmer
        | ToolName::StringTrimmer => &[],
    }
}

/// Union of the skills implied by every tool on site.
pub fn required_skills(tools: &[ToolOnSite]) -> BTreeSet<Skill> {
    tools
        .iter()
        .flat_map(|entry| skills_for_tool(entry.tool).iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_site(tool: ToolName) -> ToolOnSite {
        ToolOnSite { tool, amount: 1 }
    }

    #[test]
    fn painting_tools_collapse_to_a_single_skill() {
        let tools = vec![
            on_site(ToolName::PaintRoller),
            on_site(ToolName::Paint),
            on_site(ToolName::MaskingTape),
        ];

        let skills = required_skills(&tools);

        assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec![Skill::Artist]);
        assert_eq!(tools[0].tool, ToolName::PaintRoller, "input order is untouched");
    }

    #[test]
    fn generic_tools_require_nothing() {
        let tools = vec![on_site(ToolName::Shovel), on_site(ToolName::Gloves)];
        assert!(required_skills(&tools).is_empty());
    }

    #[test]
    fn mixed_tools_union_their_skills() {
        let tools = vec![
            on_site(ToolName::Chainsaw),
            on_site(ToolName::Ladder),
            on_site(ToolName::Axe),
            on_site(ToolName::CircularSaw),
        ];

        let skills = required_skills(&tools);

        assert_eq!(skills.len(), 3);
        assert!(skills.contains(&Skill::Danger));
        assert!(skills.contains(&Skill::Heights));
        assert!(skills.contains(&Skill::Lumberjack));
    }
}
