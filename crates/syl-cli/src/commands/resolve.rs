use anyhow::Context;
use serde::Serialize;
use syl_config::SyllabusConfig;
use syl_core::CourseId;
use syl_engine::{
    MatchMethod, NameMatch, ResolutionOutcome, ResolutionQuery, StaffDirectory, StaffResolver,
    normalize,
};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct Candidate {
    pub staff: String,
    pub score: f64,
    pub short_form: bool,
}

#[derive(Debug, Serialize)]
pub struct Decision {
    pub staff: String,
    pub method: MatchMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_added: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_added: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub name: String,
    pub placeholder: bool,
    pub exact: Option<String>,
    pub candidates: Vec<Candidate>,
    /// `None` when the name stays unresolved.
    pub decision: Option<Decision>,
}

/// Handle `syl resolve`.
pub fn handle(
    args: &ResolveArgs,
    config: &SyllabusConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, config)?;
    output(&response, flags.format)
}

pub fn run(args: &ResolveArgs, config: &SyllabusConfig) -> anyhow::Result<ResolveResponse> {
    let mut directory = bootstrap::build_directory(&args.directory, config)?;
    let name = args.name.as_str();

    let placeholder = bootstrap::pass_options(config).is_placeholder(name);
    if placeholder {
        return Ok(ResolveResponse {
            name: args.name.clone(),
            placeholder,
            exact: None,
            candidates: Vec::new(),
            decision: None,
        });
    }

    let exact = directory
        .lookup_exact(name)
        .map(|staff| directory.display_name(staff).to_string());
    // An exact alias hit needs no tokenized form.
    let query = match normalize(name) {
        Ok(query) => Some(query),
        Err(_) if exact.is_some() => None,
        Err(err) => return Err(err).with_context(|| format!("cannot resolve {name:?}")),
    };
    let candidates = directory
        .lookup_fuzzy(name)
        .into_iter()
        .map(|candidate| Candidate {
            staff: directory.display_name(candidate.staff).to_string(),
            score: candidate.score,
            short_form: query
                .as_ref()
                .is_some_and(|query| directory.has_short_form_alias(candidate.staff, query)),
        })
        .collect();

    let resolver = StaffResolver::with_threshold(config.resolver.strong_match_threshold)
        .with_span(tracing::info_span!("resolve"));
    let decision = match &args.course {
        Some(course) => {
            let course: CourseId = course
                .parse()
                .with_context(|| format!("invalid --course {course:?}"))?;
            match resolver.resolve(&ResolutionQuery::new(name, &course), &mut directory)? {
                ResolutionOutcome::Attached(attachment) => {
                    let mut decision = describe(&attachment.matched, &directory);
                    decision.alias_added = Some(attachment.alias_added);
                    decision.course_added = Some(attachment.course_added);
                    Some(decision)
                }
                ResolutionOutcome::Unresolved => None,
            }
        }
        None => resolver
            .match_name(name, &directory)?
            .map(|matched| describe(&matched, &directory)),
    };

    Ok(ResolveResponse {
        name: args.name.clone(),
        placeholder,
        exact,
        candidates,
        decision,
    })
}

fn describe(matched: &NameMatch, directory: &StaffDirectory) -> Decision {
    Decision {
        staff: directory.display_name(matched.staff).to_string(),
        method: matched.method,
        contender: matched
            .contender
            .map(|staff| directory.display_name(staff).to_string()),
        alias_added: None,
        course_added: None,
    }
}
