//! Renders a template token sequence into an email local-part.


use crate::name::DecomposedName;
use crate::templates::{NameGroup, TemplateToken};

/// Renders `token_seq` against `name`.
///
/// Returns `None` when the template is not applicable to this name: a
/// component token indexes past the end of its group's vector, or an
/// initial is requested from an empty component. Callers drop such
/// templates silently.
pub fn resolve_local_part(name: &DecomposedName, token_seq: &[TemplateToken]) -> Option<String> {
    let mut local_part = String::new();

    for token in token_seq {
        match token {
            TemplateToken::Separator(separator) => local_part.push_str(separator),
            TemplateToken::Component { group, index, flags } => {
                let components = name_group(name, *group);
                let component = components.get(*index)?;

                if flags.use_initial {
                    let initial = component.chars().next()?;
                    local_part.extend(initial.to_lowercase());
                } else {
                    // Components come out of the decomposer already
                    // normalised; lowering here keeps rendering safe for
                    // names constructed outside it.
                    local_part.push_str(&component.to_lowercase());
                }
            }
        }
    }

    Some(local_part)
}

fn name_group(name: &DecomposedName, group: NameGroup) -> &[String] {
    match group {
        NameGroup::First => name.first_names(),
        NameGroup::Middle => name.middle_names(),
        NameGroup::Last => name.last_names(),
    }
}
