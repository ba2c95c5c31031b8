use quick_xml::{
    escape::{
        escape,
        partial_escape,
    },
    events::{
        BytesDecl,
        BytesEnd,
        BytesStart,
        BytesText,
        Event,
    },
    Error,
    Writer,
};
use std::{
    borrow::Cow,
    io::Write,
};

use crate::error::GeneratorError;
use super::*;

type XmlResult = Result<(), Error>;

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Apostrophes are left as is, the values are always double quoted.
fn attribute_value(value: &str) -> Cow<str> {
    let escaped = escape(value);
    if escaped.contains("&apos;") {
        Cow::Owned(escaped.replace("&apos;", "'"))
    } else {
        escaped
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs.iter() {
        let value = attribute_value(value);
        start.push_attribute((key.as_bytes(), value.as_bytes()));
    }
    start
}

fn start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> XmlResult {
    writer.write_event(Event::Start(element(name, attrs)))
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> XmlResult {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> XmlResult {
    writer.write_event(Event::Empty(element(name, attrs)))
}

fn text<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
    content: &str,
) -> XmlResult {
    start(writer, name, attrs)?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(content))))?;
    end(writer, name)
}

fn write_action<W: Write>(writer: &mut Writer<W>, action: &ActionNode) -> XmlResult {
    text(writer, "action", &[
        ("category", action.category.as_str()),
        ("icon", action.icon.as_str()),
        ("url", action.url.as_str()),
    ], &action.label)
}

fn write_guard<W: Write>(writer: &mut Writer<W>, guard: &GuardNode) -> XmlResult {
    start(writer, "guard", &[])?;
    match guard {
        GuardNode::Roles(roles) => for role in roles.iter() {
            text(writer, "guard-role", &[], role)?;
        },
        GuardNode::Disabled => text(writer, "guard-expression", &[], DISABLED_GUARD)?,
    }
    end(writer, "guard")
}

impl StateNode {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult {
        let attrs = [
            ("state_id", self.state_id.as_str()),
            ("title", self.title.as_str()),
        ];
        if self.exit_transitions.is_empty() && self.permission_maps.is_empty() {
            return empty(writer, "state", &attrs);
        }
        start(writer, "state", &attrs)?;
        for transition_id in self.exit_transitions.iter() {
            empty(writer, "exit-transition", &[("transition_id", transition_id.as_str())])?;
        }
        for map in self.permission_maps.iter() {
            let attrs = [
                ("name", map.name.as_str()),
                ("acquired", flag(map.acquired)),
            ];
            if map.roles.is_empty() {
                empty(writer, "permission-map", &attrs)?;
                continue;
            }
            start(writer, "permission-map", &attrs)?;
            for role in map.roles.iter() {
                text(writer, "permission-role", &[], role)?;
            }
            end(writer, "permission-map")?;
        }
        end(writer, "state")
    }
}

impl TransitionNode {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult {
        let trigger = self.trigger.to_string();
        start(writer, "transition", &[
            ("new_state", self.new_state.as_str()),
            ("title", self.title.as_str()),
            ("transition_id", self.transition_id.as_str()),
            ("after_script", self.after_script.as_str()),
            ("before_script", self.before_script.as_str()),
            ("trigger", trigger.as_str()),
        ])?;
        write_action(writer, &self.action)?;
        write_guard(writer, &self.guard)?;
        end(writer, "transition")
    }
}

impl WorklistNode {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult {
        start(writer, "worklist", &[
            ("title", self.title.as_str()),
            ("worklist_id", self.worklist_id.as_str()),
        ])?;
        write_action(writer, &self.action)?;
        empty(writer, "match", &[
            ("name", self.match_name.as_str()),
            ("values", self.match_values.as_str()),
        ])?;
        write_guard(writer, &self.guard)?;
        end(writer, "worklist")
    }
}

impl VariableNode {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> XmlResult {
        start(writer, "variable", &[
            ("variable_id", self.variable_id),
            ("for_catalog", flag(self.for_catalog)),
            ("for_status", flag(self.for_status)),
            ("update_always", flag(self.update_always)),
        ])?;
        text(writer, "description", &[], self.description)?;
        start(writer, "default", &[])?;
        text(writer, "expression", &[], self.default_expression)?;
        end(writer, "default")?;
        if self.guard_permissions.is_empty() {
            empty(writer, "guard", &[])?;
        } else {
            start(writer, "guard", &[])?;
            for permission in self.guard_permissions.iter() {
                text(writer, "guard-permission", &[], permission)?;
            }
            end(writer, "guard")?;
        }
        end(writer, "variable")
    }
}

impl WorkflowDoc {
    /// Writes the document as indented XML with a declaration, returning
    /// the inner writer.
    pub fn write_xml<W: Write>(&self, inner: W) -> Result<W, Error> {
        let mut writer = Writer::new_with_indent(inner, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        start(&mut writer, "dc-workflow", &[
            ("workflow_id", self.workflow_id.as_str()),
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("initial_state", self.initial_state.as_str()),
            ("state_variable", self.state_variable.as_str()),
            ("manager_bypass", flag(self.manager_bypass)),
        ])?;
        for permission in self.permissions.iter() {
            text(&mut writer, "permission", &[], permission)?;
        }
        for state in self.states.iter() {
            state.write_xml(&mut writer)?;
        }
        for transition in self.transitions.iter() {
            transition.write_xml(&mut writer)?;
        }
        for worklist in self.worklists.iter() {
            worklist.write_xml(&mut writer)?;
        }
        for variable in self.variables.iter() {
            variable.write_xml(&mut writer)?;
        }
        end(&mut writer, "dc-workflow")?;
        writer.get_mut().write_all(b"\n")?;
        Ok(writer.into_inner())
    }

    pub fn to_xml(&self) -> Result<String, GeneratorError> {
        Ok(String::from_utf8(self.write_xml(Vec::new())?)?)
    }
}
