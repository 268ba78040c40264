/*!
End-of-parse checks: arguments cut short by the end of input, and mandatory
options that never showed up.
*/

use crate::{
    Outcome,
    dispatch::Session,
    errors::ParseError,
    registry::{Entry, Registry},
};

pub(crate) fn validate(registry: &Registry<'_>, session: &mut Session) -> Result<Outcome, ParseError> {
    // An informational option ends the run; nothing else is checked.
    if session.informational {
        return Ok(Outcome::Informational);
    }

    if let Some(outstanding) = session.outstanding.take() {
        return Err(ParseError::TooFewArguments {
            option: outstanding.option,
            expected: outstanding.expected,
            got: outstanding.got,
        });
    }

    for group in registry.required_groups() {
        if group.keys().iter().any(|key| session.passed.contains(key)) {
            continue;
        }

        let mut members = registry.group_entries(group).map(Entry::name);

        if let Some(option) = members.next() {
            tracing::debug!(lead = %group.lead(), "required option missing");

            return Err(ParseError::MissingRequiredOption {
                option,
                alternatives: members.collect(),
            });
        }
    }

    Ok(Outcome::Complete)
}
