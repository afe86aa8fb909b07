// src/view/form.rs
use super::{Element, Node, el};
use crate::form::{FormState, InputMode, Section};
use crate::models::Language;

fn section(form: &FormState, section: Section) -> Element {
    let display = if form.is_section_visible(section) { "block" } else { "none" };
    el("div")
        .id(section.element_id())
        .class("mb-3")
        .attr("style", format!("display: {}", display))
}

fn mode_selector(form: &FormState) -> Element {
    el("select")
        .id("inputMethod")
        .class("form-select")
        .children(InputMode::ALL.into_iter().map(|mode| {
            let option = el("option").attr("value", mode.as_str());
            let option = if mode == form.mode() {
                option.attr("selected", "selected")
            } else {
                option
            };
            option.text(mode.label())
        }))
}

fn language_selector(form: &FormState) -> Element {
    el("select")
        .id("language")
        .class("form-select")
        .children(Language::ALL.into_iter().map(|lang| {
            let option = el("option").attr("value", lang.as_str());
            let option = if lang == form.language {
                option.attr("selected", "selected")
            } else {
                option
            };
            option.text(lang.label())
        }))
}

fn test_case_rows(form: &FormState) -> Element {
    el("div").id("testCases").children(form.test_cases.rows().map(|(id, row)| {
        el("div")
            .class("input-group mb-2")
            .child(
                el("input")
                    .attr("type", "text")
                    .class("form-control")
                    .attr("placeholder", "Function call")
                    .id(format!("testCall{}", id))
                    .attr("value", row.function_call.clone()),
            )
            .child(
                el("input")
                    .attr("type", "text")
                    .class("form-control")
                    .attr("placeholder", "Expected output")
                    .id(format!("testExpected{}", id))
                    .attr("value", row.expected.clone()),
            )
    }))
}

/// The evaluation form for the current field values.
pub fn render_form(form: &FormState) -> Node {
    el("form")
        .id("evaluationForm")
        .child(el("div").class("mb-3").child(mode_selector(form)))
        .child(
            section(form, Section::DirectInput).child(
                el("textarea")
                    .id("codeTextarea")
                    .class("form-control")
                    .attr("rows", "10")
                    .text(form.code_text.clone()),
            ),
        )
        .child(
            section(form, Section::FileInput).child(
                el("input")
                    .attr("type", "file")
                    .id("codeFile")
                    .class("form-control"),
            ),
        )
        .child(
            section(form, Section::GithubInput).child(
                el("input")
                    .attr("type", "url")
                    .id("githubUrl")
                    .class("form-control")
                    .attr("value", form.github_url.clone()),
            ),
        )
        .child(el("div").class("mb-3").child(language_selector(form)))
        .child(
            el("div").class("mb-3").child(
                el("textarea")
                    .id("problemDescription")
                    .class("form-control")
                    .text(form.problem_description.clone()),
            ),
        )
        .child(test_case_rows(form))
        .into_node()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_of(node: &Node, id: &str) -> String {
        node.find_by_id(id)
            .and_then(|element| element.get_attr("style"))
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_sections_follow_mode() {
        let mut form = FormState::new();
        form.select_mode(InputMode::Github);
        let node = render_form(&form);

        assert_eq!(display_of(&node, "directInput"), "display: none");
        assert_eq!(display_of(&node, "fileInput"), "display: none");
        assert_eq!(display_of(&node, "githubInput"), "display: block");
    }

    #[test]
    fn test_field_values_survive_mode_switch() {
        let mut form = FormState::new();
        form.code_text = "print('hi')".to_string();
        form.github_url = "https://github.com/a/b".to_string();

        let direct = render_form(&form);
        form.select_mode(InputMode::Github);
        let github = render_form(&form);

        for node in [&direct, &github] {
            let textarea = node.find_by_id("codeTextarea").unwrap();
            assert_eq!(Node::from(textarea.clone()).text_content(), "print('hi')");
            let url = node.find_by_id("githubUrl").unwrap();
            assert_eq!(url.get_attr("value"), Some("https://github.com/a/b"));
        }
    }

    #[test]
    fn test_rows_keep_their_ids() {
        let mut form = FormState::new();
        let second = form.test_cases.add_row();
        let third = form.test_cases.add_row();
        form.test_cases.remove_row(second);
        form.test_cases.set_call(third, "g()").unwrap();

        let node = render_form(&form);
        assert!(node.find_by_id("testCall0").is_some());
        assert!(node.find_by_id("testCall1").is_none());
        assert_eq!(node.find_by_id("testCall2").unwrap().get_attr("value"), Some("g()"));
    }
}
