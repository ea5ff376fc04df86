//! Editable server rules.

use std::path::Path;

use cc_common::User;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{load_snapshot, save_snapshot, ContentError};
use crate::permissions::{Permission, StaffContext};

/// A titled group of rules shown on the rules page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Individual rule lines, in display order.
    pub rules: Vec<String>,
    pub color: String,
    pub icon: String,
    pub order: u32,
}

/// Rule section as entered on the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    #[serde(default)]
    #[validate(length(max = 32, message = "Category must be at most 32 characters"))]
    pub category: String,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "At least one rule is required"))]
    pub rules: Vec<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Position on the page. Zero means "append" on create and "keep" on update.
    #[serde(default)]
    pub order: u32,
}

fn default_color() -> String {
    "blue".to_string()
}

fn default_icon() -> String {
    "📋".to_string()
}

impl RuleDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, rules: Vec<String>) -> Self {
        Self {
            category: String::new(),
            title: title.into(),
            description: description.into(),
            rules,
            color: default_color(),
            icon: default_icon(),
            order: 0,
        }
    }

    /// Trim text fields and drop blank rule lines, then validate.
    fn normalized(self) -> Result<Self, ContentError> {
        let draft = Self {
            category: self.category.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            rules: self
                .rules
                .iter()
                .map(|r| r.trim())
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect(),
            ..self
        };
        draft.validate()?;
        Ok(draft)
    }
}

/// Rule sections ordered by `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    #[must_use]
    pub fn from_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.order);
        Self { rules }
    }

    /// The sections a fresh server starts with.
    #[must_use]
    pub fn with_defaults() -> Self {
        let section = |id: &str, category: &str, title: &str, description: &str, lines: &[&str], color: &str, icon: &str, order| Rule {
            id: id.to_string(),
            category: category.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            rules: lines.iter().map(|l| (*l).to_string()).collect(),
            color: color.to_string(),
            icon: icon.to_string(),
            order,
        };

        Self::from_rules(vec![
            section(
                "1",
                "general",
                "Genel Kurallar",
                "Sunucuda uyulması gereken temel kurallar",
                &[
                    "Sunucuda saygılı ve nazik davranın",
                    "Küfür, hakaret ve argo kelimeler kullanmayın",
                    "Spam yapmayın ve flood atmayın",
                    "Reklam yapmak kesinlikle yasaktır",
                    "Oyun içi ekonomiyi bozmaya çalışmayın",
                    "Hile, bug abuse ve exploit kullanmayın",
                    "Diğer oyuncuları rahatsız etmeyin",
                    "Sunucu kurallarına uyun ve yetkililerle işbirliği yapın",
                ],
                "blue",
                "📋",
                1,
            ),
            section(
                "2",
                "staff",
                "Yetkili Kuralları",
                "Yetkili personel için özel kurallar",
                &[
                    "Yetkilerinizi kötüye kullanmayın",
                    "Adil ve objektif davranın",
                    "Kişisel çıkarlarınız için yetki kullanmayın",
                    "Diğer yetkililerle saygılı iletişim kurun",
                    "Ceza verirken sebep belirtin",
                    "Büyük kararları üst yetkililerle görüşün",
                    "Aktif olmaya çalışın ve sorumluluklarınızı yerine getirin",
                    "Sunucu sırlarını paylaşmayın",
                ],
                "green",
                "🛡️",
                2,
            ),
            section(
                "3",
                "chat",
                "Chat Kuralları",
                "Sohbet kanalları için kurallar",
                &[
                    "Büyük harfle yazmayın (CAPS LOCK)",
                    "Aynı mesajı tekrar tekrar atmayın",
                    "Kişisel bilgilerinizi paylaşmayın",
                    "Link paylaşımı yapmayın",
                    "Politik ve dini konularda tartışma yapmayın",
                    "Diğer oyuncuları taciz etmeyin",
                    "Uygunsuz içerik paylaşmayın",
                    "Türkçe dışında dil kullanmayın",
                ],
                "purple",
                "💬",
                3,
            ),
        ])
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn index_of(&self, id: &str) -> Result<usize, ContentError> {
        self.rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ContentError::not_found("Rule", id))
    }

    fn sort(&mut self) {
        self.rules.sort_by_key(|r| r.order);
    }

    /// Load a snapshot. A missing or empty file yields the default sections.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let rules: Vec<Rule> = load_snapshot(path)?;
        if rules.is_empty() {
            Ok(Self::with_defaults())
        } else {
            Ok(Self::from_rules(rules))
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        save_snapshot(path, &self.rules)
    }

    /// Add a rule section. Needs `edit_rules`.
    pub fn create(&mut self, actor: &User, draft: RuleDraft) -> Result<&Rule, ContentError> {
        StaffContext::for_active_user(actor)?.require_permission(Permission::EditRules)?;
        let draft = draft.normalized()?;

        let rule = Rule {
            id: Uuid::now_v7().to_string(),
            category: if draft.category.is_empty() {
                "custom".to_string()
            } else {
                draft.category
            },
            title: draft.title,
            description: draft.description,
            rules: draft.rules,
            color: draft.color,
            icon: draft.icon,
            order: if draft.order == 0 {
                u32::try_from(self.rules.len() + 1).unwrap_or(u32::MAX)
            } else {
                draft.order
            },
        };

        info!(rule_id = %rule.id, actor_id = %actor.id, title = %rule.title, "Created rule section");
        let id = rule.id.clone();
        self.rules.push(rule);
        self.sort();
        Ok(&self.rules[self.index_of(&id)?])
    }

    /// Replace a section's text, style and position. Id and category stay.
    pub fn update(&mut self, actor: &User, id: &str, draft: RuleDraft) -> Result<&Rule, ContentError> {
        StaffContext::for_active_user(actor)?.require_permission(Permission::EditRules)?;
        let draft = draft.normalized()?;

        let idx = self.index_of(id)?;
        let rule = &mut self.rules[idx];
        rule.title = draft.title;
        rule.description = draft.description;
        rule.rules = draft.rules;
        rule.color = draft.color;
        rule.icon = draft.icon;
        if draft.order != 0 {
            rule.order = draft.order;
        }

        info!(rule_id = id, actor_id = %actor.id, "Updated rule section");
        self.sort();
        Ok(&self.rules[self.index_of(id)?])
    }

    pub fn delete(&mut self, actor: &User, id: &str) -> Result<Rule, ContentError> {
        StaffContext::for_active_user(actor)?.require_permission(Permission::EditRules)?;
        let idx = self.index_of(id)?;

        info!(rule_id = id, actor_id = %actor.id, "Deleted rule section");
        Ok(self.rules.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::member;
    use crate::permissions::PermissionError;
    use cc_common::Rank;

    fn draft(title: &str) -> RuleDraft {
        RuleDraft::new(title, "Build rules", vec!["No lava casts".into(), "  ".into()])
    }

    #[test]
    fn test_defaults_are_ordered() {
        let book = RuleBook::with_defaults();
        let orders: Vec<u32> = book.rules().iter().map(|r| r.order).collect();
        assert_eq!(orders, [1, 2, 3]);
        assert_eq!(book.get("2").unwrap().category, "staff");
        assert!(book.rules().iter().all(|r| r.rules.len() == 8));
    }

    #[test]
    fn test_developer_creates_rule() {
        let dev = member("dev", Rank::Developer);
        let mut book = RuleBook::with_defaults();

        let rule = book.create(&dev, draft("  Build  ")).unwrap();
        assert_eq!(rule.title, "Build");
        assert_eq!(rule.category, "custom");
        assert_eq!(rule.order, 4);
        assert_eq!(rule.rules, vec!["No lava casts".to_string()]);
        assert_eq!(book.rules().len(), 4);
    }

    #[test]
    fn test_create_with_order_sorts() {
        let dev = member("dev", Rank::Developer);
        let mut book = RuleBook::with_defaults();

        let mut first = draft("PvP");
        first.order = 0;
        first.category = "pvp".into();
        book.create(&dev, first).unwrap();

        let mut top = draft("Top");
        top.order = 1;
        book.create(&dev, top).unwrap();
        assert_eq!(book.rules()[0].order, 1);
        assert_eq!(book.rules().last().unwrap().category, "pvp");
    }

    #[test]
    fn test_admin_cannot_edit_rules() {
        let admin = member("admin", Rank::Admin);
        let mut book = RuleBook::with_defaults();

        let err = book.create(&admin, draft("Build")).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Permission(PermissionError::MissingPermission(Permission::EditRules))
        ));
        assert!(book.delete(&admin, "1").is_err());
        assert_eq!(book.rules().len(), 3);
    }

    #[test]
    fn test_banned_developer_cannot_edit_rules() {
        let mut dev = member("dev", Rank::Developer);
        dev.is_banned = true;
        let mut book = RuleBook::with_defaults();

        assert!(matches!(
            book.delete(&dev, "1"),
            Err(ContentError::Permission(PermissionError::InactiveAccount(_)))
        ));
    }

    #[test]
    fn test_blank_rule_lines_are_rejected() {
        let dev = member("dev", Rank::Developer);
        let mut book = RuleBook::with_defaults();
        let blank = RuleDraft::new("Build", "desc", vec!["   ".into()]);

        assert!(matches!(
            book.create(&dev, blank),
            Err(ContentError::Validation(_))
        ));
    }

    #[test]
    fn test_update_keeps_id_and_category() {
        let founder = member("founder", Rank::Founder);
        let mut book = RuleBook::with_defaults();

        let mut edit = draft("Genel");
        edit.category = "ignored".into();
        let rule = book.update(&founder, "1", edit).unwrap();
        assert_eq!(rule.id, "1");
        assert_eq!(rule.category, "general");
        assert_eq!(rule.title, "Genel");
        assert_eq!(rule.order, 1);

        let mut moved = draft("Genel");
        moved.order = 10;
        book.update(&founder, "1", moved).unwrap();
        assert_eq!(book.rules().last().unwrap().id, "1");
    }

    #[test]
    fn test_delete() {
        let founder = member("founder", Rank::Founder);
        let mut book = RuleBook::with_defaults();

        assert_eq!(book.delete(&founder, "3").unwrap().category, "chat");
        assert!(book.get("3").is_none());
        assert!(matches!(
            book.delete(&founder, "3"),
            Err(ContentError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        assert_eq!(RuleBook::load(&path).unwrap(), RuleBook::with_defaults());

        let founder = member("founder", Rank::Founder);
        let mut book = RuleBook::with_defaults();
        book.delete(&founder, "2").unwrap();
        book.save(&path).unwrap();
        assert_eq!(RuleBook::load(&path).unwrap().rules().len(), 2);
    }
}
