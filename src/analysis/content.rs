// src/analysis/content.rs
// Placeholder page synthesis for the heuristic scorer

/// A heading in the synthesized page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// The page the scorer looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub meta_description: String,
    pub body: String,
    pub headings: Vec<Heading>,
}

impl PageContent {
    pub fn headings_at(&self, level: u8) -> usize {
        self.headings.iter().filter(|h| h.level == level).count()
    }
}

const BODY_TEMPLATE: &[&str] = &[
    "{t} has become an essential topic for businesses and individuals who want to grow online. \
     Understanding {t} helps you make better decisions, avoid common mistakes and build a strategy \
     that delivers measurable results over time.",
    "The first step with {t} is research. Study your audience, review what competitors publish and \
     identify the questions people ask most often. Good research turns {t} from guesswork into a \
     repeatable process that your whole team can follow.",
    "Next, focus on quality. Content about {t} should be accurate, practical and easy to read. \
     Break complex ideas into short sections, use examples from real projects and update older \
     pages whenever your approach to {t} changes.",
    "Measurement matters just as much as execution. Track traffic, engagement and conversions so \
     you can see which {t} strategies work. Small improvements, tested carefully, usually outperform \
     large changes made without data.",
    "Finally, stay consistent. Publishing regularly, refining existing pages and learning from \
     results will keep your {t} strategy effective as search engines and audience expectations \
     continue to evolve.",
];

/// Build a believable page for `topic`; an empty topic gives an empty page
pub fn synthesize(topic: &str) -> PageContent {
    let topic = topic.trim();
    if topic.is_empty() {
        return PageContent::default();
    }

    let title = format!("{}: Complete Guide and Best Practices", topic);
    let meta_description = format!(
        "Learn everything about {t}: proven strategies, practical tips and expert insights to help \
         you understand {t} and get better results today.",
        t = topic
    );

    let body = BODY_TEMPLATE
        .iter()
        .map(|paragraph| paragraph.replace("{t}", topic))
        .collect::<Vec<_>>()
        .join("\n\n");

    let headings = vec![
        Heading {
            level: 1,
            text: topic.to_string(),
        },
        Heading {
            level: 2,
            text: format!("Why {} Matters", topic),
        },
        Heading {
            level: 2,
            text: format!("Getting Started with {}", topic),
        },
        Heading {
            level: 2,
            text: format!("Measuring {} Results", topic),
        },
    ];

    PageContent {
        title,
        meta_description,
        body,
        headings,
    }
}
