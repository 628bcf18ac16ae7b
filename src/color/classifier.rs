use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// A colored sub-series of the stacked bar chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blue,
    Purple,
    Red,
}

impl Category {
    /// All categories in declaration order (also the column order of exports).
    pub const ALL: [Category; 3] = [Category::Blue, Category::Purple, Category::Red];

    pub const COUNT: usize = Self::ALL.len();

    /// Position in `ALL`, for array-backed per-category storage.
    pub fn index(self) -> usize {
        match self {
            Category::Blue => 0,
            Category::Purple => 1,
            Category::Red => 2,
        }
    }

    /// Default predicate for this category over 8-bit RGB channels.
    pub fn matches(self, r: u8, g: u8, b: u8) -> bool {
        let (r, g, b) = (r as i32, g as i32, b as i32);
        match self {
            Category::Blue => b > 150 && b > r + 30 && b > g + 30,
            Category::Purple => r > 100 && b > 100 && g < 150 && (r - b).abs() < 80,
            Category::Red => r > 150 && g < 100 && b < 100,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Blue => "blue",
            Category::Purple => "purple",
            Category::Red => "red",
        }
    }
}

/// Checks that `order` names every category exactly once.
pub(crate) fn validate_permutation(order: &[Category], what: &str) -> Result<()> {
    let mut seen = [false; Category::COUNT];
    for category in order {
        if std::mem::replace(&mut seen[category.index()], true) {
            return Err(ExtractError::InvalidStackOrder(format!(
                "{} lists {} more than once",
                what,
                category.name()
            )));
        }
    }
    if let Some(missing) = Category::ALL.iter().find(|c| !seen[c.index()]) {
        return Err(ExtractError::InvalidStackOrder(format!(
            "{} is missing {}",
            what,
            missing.name()
        )));
    }
    Ok(())
}

/// Decides which category, if any, a pixel belongs to.
pub trait PixelClassifier {
    fn classify(&self, r: u8, g: u8, b: u8) -> Option<Category>;
}

/// Order in which predicates are tried; every category appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Priority(Vec<Category>);

impl Priority {
    pub fn new(order: Vec<Category>) -> Result<Self> {
        validate_permutation(&order, "classifier priority")?;
        Ok(Self(order))
    }

    pub fn order(&self) -> &[Category] {
        &self.0
    }
}

/// Blue and purple overlap for saturated violet pixels; blue is checked first.
impl Default for Priority {
    fn default() -> Self {
        Self(vec![Category::Blue, Category::Purple, Category::Red])
    }
}

impl TryFrom<Vec<Category>> for Priority {
    type Error = ExtractError;

    fn try_from(order: Vec<Category>) -> Result<Self> {
        Self::new(order)
    }
}

impl From<Priority> for Vec<Category> {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// Classifier over the default predicates with an explicit tie-break order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorClassifier {
    priority: Priority,
}

impl ColorClassifier {
    pub fn new(priority: Priority) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &Priority {
        &self.priority
    }
}

impl PixelClassifier for ColorClassifier {
    fn classify(&self, r: u8, g: u8, b: u8) -> Option<Category> {
        self.priority.order().iter().copied().find(|c| c.matches(r, g, b))
    }
}
