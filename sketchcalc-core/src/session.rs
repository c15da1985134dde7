//! Ambient session state: variable bindings, recognized formulas, and the
//! shared overlay anchor.
//!
//! All mutation goes through this type's methods; components never write
//! session fields directly. Bindings grow monotonically until an explicit
//! reset, and every formula entry shares one overlay anchor (a drag moves
//! them all together).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::geometry::Point;
use crate::style::{Rgb, StrokeStyle};
use crate::tool::Tool;

/// Overlay anchor used before any bounding-box scan has run.
const DEFAULT_ANCHOR: Point = Point::new(10.0, 200.0);

/// Variable bindings accumulated from assignment records.
///
/// Keys are expression strings, values are result strings. Serializes as
/// a flat string-to-string map, exactly the wire shape the recognition
/// service expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableBindings {
    vars: HashMap<String, String>,
}

impl VariableBindings {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a binding.
    pub fn insert(&mut self, expr: impl Into<String>, result: impl Into<String>) {
        let expr = expr.into();
        let result = result.into();
        if let Some(previous) = self.vars.insert(expr.clone(), result) {
            tracing::debug!("binding {expr} overwritten (was {previous})");
        }
    }

    /// Look up a binding by expression.
    #[must_use]
    pub fn get(&self, expr: &str) -> Option<&str> {
        self.vars.get(expr).map(String::as_str)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no bindings exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.vars.clear();
    }
}

/// A recognized expression rendered as formula markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaEntry {
    /// Unique identifier for this entry.
    pub id: Uuid,
    /// The expression as read from the drawing.
    pub expression: String,
    /// The evaluated (or assigned) answer.
    pub answer: String,
    /// Inline display-math markup for the external formula renderer.
    pub markup: String,
}

impl FormulaEntry {
    /// Build an entry from an expression/answer pair, deriving the markup
    /// string the formula renderer consumes.
    #[must_use]
    pub fn new(expression: impl Into<String>, answer: impl Into<String>) -> Self {
        let expression = expression.into();
        let answer = answer.into();
        let markup = format!("\\(\\LARGE{{{expression} = {answer}}}\\)");
        Self {
            id: Uuid::new_v4(),
            expression,
            answer,
            markup,
        }
    }
}

/// The complete per-session state shared by the tool machine and the
/// result overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Currently selected tool.
    pub tool: Tool,
    /// Configured stroke style (the eraser ignores it).
    pub stroke: StrokeStyle,
    /// Accumulated variable bindings.
    bindings: VariableBindings,
    /// Recognized formulas, in reveal order.
    formulas: Vec<FormulaEntry>,
    /// Shared anchor applied to every formula entry.
    pub overlay_anchor: Point,
}

impl SessionState {
    /// Create a fresh session: pen tool, default stroke, no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool: Tool::default(),
            stroke: StrokeStyle::default(),
            bindings: VariableBindings::new(),
            formulas: Vec::new(),
            overlay_anchor: DEFAULT_ANCHOR,
        }
    }

    /// Select a tool. A pure transition: nothing else changes.
    pub fn select_tool(&mut self, tool: Tool) {
        tracing::debug!("tool selected: {tool}");
        self.tool = tool;
    }

    /// Set the configured stroke color.
    pub fn set_color(&mut self, color: Rgb) {
        self.stroke.color = color;
    }

    /// Set the configured stroke width.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStrokeWidth`] if `width` is zero.
    pub fn set_stroke_width(&mut self, width: u32) -> CoreResult<()> {
        self.stroke = StrokeStyle::new(self.stroke.color, width)?;
        Ok(())
    }

    /// The accumulated variable bindings.
    #[must_use]
    pub fn bindings(&self) -> &VariableBindings {
        &self.bindings
    }

    /// Record an assignment: insert or overwrite a binding.
    pub fn bind(&mut self, expr: impl Into<String>, result: impl Into<String>) {
        self.bindings.insert(expr, result);
    }

    /// Recognized formulas, in reveal order.
    #[must_use]
    pub fn formulas(&self) -> &[FormulaEntry] {
        &self.formulas
    }

    /// Append a formula entry.
    pub fn push_formula(&mut self, entry: FormulaEntry) {
        self.formulas.push(entry);
    }

    /// Reposition the shared overlay anchor. Every entry moves with it.
    pub fn set_overlay_anchor(&mut self, point: Point) {
        self.overlay_anchor = point;
    }

    /// Clear formulas and bindings, returning to the initial state.
    ///
    /// The overlay anchor is deliberately left where the user last put
    /// it; only content is destroyed.
    pub fn reset(&mut self) {
        self.formulas.clear();
        self.bindings.clear();
        tracing::debug!("session reset");
    }

    /// Serialize the session to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Serialization)
    }

    /// Deserialize a session from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::Serialization)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_grow_and_overwrite() {
        let mut bindings = VariableBindings::new();
        bindings.insert("x", "5");
        bindings.insert("y", "7");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("x"), Some("5"));

        bindings.insert("x", "9");
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("x"), Some("9"));
    }

    #[test]
    fn test_bindings_serialize_flat() {
        let mut bindings = VariableBindings::new();
        bindings.insert("x", "5");
        let json = serde_json::to_string(&bindings).expect("serialize");
        assert_eq!(json, "{\"x\":\"5\"}");
    }

    #[test]
    fn test_formula_markup() {
        let entry = FormulaEntry::new("2+2", "4");
        assert!(entry.markup.contains("2+2 = 4"));
        assert!(entry.markup.starts_with("\\(\\LARGE{"));
        assert!(entry.markup.ends_with("}\\)"));
    }

    #[test]
    fn test_reset_clears_content_twice() {
        let mut session = SessionState::new();
        session.bind("x", "5");
        session.push_formula(FormulaEntry::new("x", "5"));
        session.set_overlay_anchor(Point::new(40.0, 60.0));

        session.reset();
        assert!(session.bindings().is_empty());
        assert!(session.formulas().is_empty());

        // Idempotent: a second reset yields the same empty state.
        session.reset();
        assert!(session.bindings().is_empty());
        assert!(session.formulas().is_empty());
        // Anchor position is user state, not content.
        assert_eq!(session.overlay_anchor, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_select_tool_is_pure() {
        let mut session = SessionState::new();
        session.bind("x", "5");
        session.select_tool(Tool::Circle);
        assert_eq!(session.tool, Tool::Circle);
        assert_eq!(session.bindings().len(), 1);
        assert!(session.formulas().is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let mut session = SessionState::new();
        session.select_tool(Tool::Line);
        session.bind("a", "1");
        let json = session.to_json().expect("serialize");
        let restored = SessionState::from_json(&json).expect("deserialize");
        assert_eq!(restored.tool, Tool::Line);
        assert_eq!(restored.bindings().get("a"), Some("1"));
    }
}
