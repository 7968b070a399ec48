//! Edit string parser
//!
//! Edit strings are space separated with the command name first. Quoted
//! arguments may contain spaces, so only `setAttr` is split naively.

use super::CommandType;

/// Parse one edit string into its command type and target
///
/// Unknown commands and strings missing the expected arguments degrade to
/// `(Unsupported, None)`.
pub fn parse_edit(edit: &str) -> (CommandType, Option<String>) {
    let command = edit
        .split_whitespace()
        .next()
        .map(CommandType::from_command_name)
        .unwrap_or(CommandType::Unsupported);

    let target = match command {
        CommandType::SetAttr => set_attr_target(edit),
        CommandType::ConnectAttr => connect_attr_target(edit),
        CommandType::Parent => parent_target(edit),
        CommandType::Unsupported => None,
    };

    match target {
        Some(target) if !target.is_empty() => (command, Some(target)),
        _ => (CommandType::Unsupported, None),
    }
}

/// `setAttr <plug> <args...>`: the plug token verbatim
fn set_attr_target(edit: &str) -> Option<String> {
    edit.split_whitespace().nth(1).map(str::to_string)
}

/// `connectAttr <source> <destination> <args...>`: the destination, unquoted
fn connect_attr_target(edit: &str) -> Option<String> {
    let tokens = tokenize(edit);
    tokens.get(2).map(|token| strip_quotes(token).to_string())
}

/// `parent <args...> "<a>" "<b>"`: the second-to-last quoted segment
fn parent_target(edit: &str) -> Option<String> {
    let quoted: Vec<&str> = edit.split('"').skip(1).step_by(2).collect();
    if quoted.len() < 2 {
        return None;
    }
    Some(quoted[quoted.len() - 2].to_string())
}

/// Split on whitespace outside double quotes. Quotes stay in the tokens.
fn tokenize(edit: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = edit.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn strip_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Split a plug at its first `.` into `(node, attribute)`
///
/// The attribute keeps any further dots (compound and array attributes are
/// not taken apart). Returns `None` for bare node names.
pub fn split_plug(plug: &str) -> Option<(&str, &str)> {
    plug.split_once('.')
}

pub fn join_plug(node: &str, attribute: &str) -> String {
    format!("{}.{}", node, attribute)
}

/// Root namespace of a node or plug: everything before the first `:`.
/// Hierarchy paths are not stripped, so `|grp|ns:arm` gives `|grp|ns`.
pub fn root_namespace(name: &str) -> Option<&str> {
    name.split_once(':').map(|(namespace, _)| namespace)
}

/// Node name without hierarchy path or namespaces
pub fn short_name(node: &str) -> &str {
    let leaf = node.rsplit('|').next().unwrap_or(node);
    leaf.rsplit(':').next().unwrap_or(leaf)
}

/// Display label for a plug: the attribute chain without node or namespace
pub fn plug_attribute_label(plug: &str) -> &str {
    split_plug(plug).map_or(plug, |(_, attribute)| attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_target_is_second_token() {
        let edits = [
            "setAttr charRig:arm.translateX 5",
            "setAttr |grp|charRig:arm.rotate -type \"double3\" 0 90 0",
            "setAttr   ns:mesh.pnts[3].pntx 0.25",
            "setAttr bare 1",
        ];
        for edit in edits {
            let (command, target) = parse_edit(edit);
            assert_eq!(command, CommandType::SetAttr);
            assert_eq!(target.as_deref(), edit.split_whitespace().nth(1));
        }
    }

    #[test]
    fn test_connect_attr_target_is_unquoted_destination() {
        let (command, target) =
            parse_edit(r#"connectAttr "ctrl:hand.worldMatrix[0]" "charRig:arm.offsetParentMatrix" -f"#);
        assert_eq!(command, CommandType::ConnectAttr);
        assert_eq!(target.as_deref(), Some("charRig:arm.offsetParentMatrix"));
    }

    #[test]
    fn test_connect_attr_quoted_source_with_spaces() {
        let (_, target) = parse_edit(r#"connectAttr "odd name.out" "charRig:arm.tx""#);
        assert_eq!(target.as_deref(), Some("charRig:arm.tx"));
    }

    #[test]
    fn test_connect_attr_unquoted_destination() {
        let (_, target) = parse_edit("connectAttr a.out b.in");
        assert_eq!(target.as_deref(), Some("b.in"));
    }

    #[test]
    fn test_parent_target_is_second_to_last_quoted_segment() {
        let (command, target) = parse_edit(r#"parent -s -r "|charRig:root|grp" "|charRig:arm""#);
        assert_eq!(command, CommandType::Parent);
        assert_eq!(target.as_deref(), Some("|charRig:root|grp"));

        let (_, target) = parse_edit(r#"parent "a b" "c" "d""#);
        assert_eq!(target.as_deref(), Some("c"));
    }

    #[test]
    fn test_unsupported_and_malformed_degrade() {
        let edits = [
            "fooCommand bar baz",
            "",
            "   ",
            "setAttr",
            "connectAttr \"only.source\"",
            "parent -w \"lonely\"",
            "disconnectAttr a.b c.d",
            "\"unbalanced",
        ];
        for edit in edits {
            assert_eq!(parse_edit(edit), (CommandType::Unsupported, None), "edit: {:?}", edit);
        }
    }

    #[test]
    fn test_split_plug_keeps_compound_attribute() {
        assert_eq!(split_plug("ns:mesh.pnts[3].pntx"), Some(("ns:mesh", "pnts[3].pntx")));
        assert_eq!(split_plug("ns:mesh"), None);
    }

    #[test]
    fn test_split_and_join_plug_round_trip() {
        for plug in ["a.b", "ns:node.attr.child", "|grp|n.x[0].y", ".x", "n."] {
            let (node, attribute) = split_plug(plug).unwrap();
            assert_eq!(join_plug(node, attribute), plug);
        }
    }

    #[test]
    fn test_root_namespace() {
        assert_eq!(root_namespace("charRig:arm.translateX"), Some("charRig"));
        assert_eq!(root_namespace("outer:inner:arm"), Some("outer"));
        assert_eq!(root_namespace("|grp|charRig:arm"), Some("|grp|charRig"));
        assert_eq!(root_namespace("|charRig:grp|charRig:arm"), Some("|charRig"));
        assert_eq!(root_namespace("arm"), None);
    }

    #[test]
    fn test_short_name_and_plug_label() {
        assert_eq!(short_name("|charRig:root|charRig:arm"), "arm");
        assert_eq!(short_name("outer:inner:arm"), "arm");
        assert_eq!(short_name("arm"), "arm");
        assert_eq!(plug_attribute_label("charRig:arm.translateX"), "translateX");
        assert_eq!(plug_attribute_label("ns:mesh.pnts[3].pntx"), "pnts[3].pntx");
    }
}
