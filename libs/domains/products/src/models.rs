use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Store-assigned product identifier
pub type ProductId = i64;

/// Default page size when none (or zero) is requested
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Upper bound on a single page
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Largest row offset a store can be asked for (PostgreSQL `bigint`).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Product entity
///
/// `id` is `None` until the store has persisted the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: Option<ProductId>,
    #[schema(example = "Widget")]
    pub name: String,
    /// Exact decimal price, written as a JSON number without rounding
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
    #[schema(example = "A useful widget")]
    pub description: String,
    #[schema(example = 5)]
    pub quantity: i32,
}

impl Product {
    /// Replace every field except `id` with those of `replacement`.
    pub fn overwrite_with(&mut self, replacement: Product) {
        self.name = replacement.name;
        self.price = replacement.price;
        self.description = replacement.description;
        self.quantity = replacement.quantity;
    }
}

/// Inbound payload for create and update
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation violation rather than a deserialization failure. Any `id`
/// in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(
        required(message = "Name is required"),
        custom(function = "name_not_blank"),
        length(min = 2, message = "Name must be at least 2 characters")
    )]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[validate(
        required(message = "Price is required"),
        custom(function = "price_at_least_one_cent")
    )]
    /// A JSON number or a numeric string, parsed exactly
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    #[schema(value_type = Option<f64>, example = 9.99)]
    pub price: Option<Decimal>,

    #[validate(
        required(message = "Description is required"),
        custom(function = "description_not_blank"),
        length(min = 10, message = "Description must be at least 10 characters")
    )]
    #[schema(example = "A useful widget")]
    pub description: Option<String>,

    #[validate(
        required(message = "Quantity is required"),
        range(min = 0, message = "Quantity must be greater than or equal to zero")
    )]
    #[schema(example = 5)]
    pub quantity: Option<i32>,
}

impl ProductInput {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            description: Some(description.into()),
            quantity: Some(quantity),
        }
    }

    /// Validate and turn into an unsaved [`Product`].
    pub fn into_product(self) -> Result<Product, ValidationErrors> {
        self.validate()?;

        match self {
            ProductInput {
                name: Some(name),
                price: Some(price),
                description: Some(description),
                quantity: Some(quantity),
            } => Ok(Product {
                id: None,
                name,
                price,
                description,
                quantity,
            }),
            // validate() rejects any missing field
            _ => Err(ValidationErrors::new()),
        }
    }
}

fn blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(message.into()));
    }
    Ok(())
}

fn name_not_blank(name: &str) -> Result<(), ValidationError> {
    blank(name, "Name is required")
}

fn description_not_blank(description: &str) -> Result<(), ValidationError> {
    blank(description, "Description is required")
}

fn price_at_least_one_cent(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::new(1, 2) {
        return Err(ValidationError::new("range")
            .with_message("Price must be greater than zero".into()));
    }
    Ok(())
}

/// Columns a page can be ordered by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Price,
    Quantity,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering of a page: `field` or `field,asc|desc`
///
/// Any field other than `id` is followed by `id` ascending so that pages are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid sort '{0}': expected one of id, name, price, quantity, optionally followed by ,asc or ,desc")]
pub struct InvalidSort(pub String);

impl FromStr for Sort {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSort(s.to_string());
        let (field, direction) = match s.split_once(',') {
            Some((field, direction)) => (field, Some(direction)),
            None => (s, None),
        };

        let field = field.trim().parse::<SortField>().map_err(|_| invalid())?;
        let direction = match direction.map(str::trim) {
            None | Some("") => SortDirection::Asc,
            Some(direction) => direction.parse().map_err(|_| invalid())?,
        };

        Ok(Self { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Sort,
}

impl PageRequest {
    /// A size of zero falls back to [`DEFAULT_PAGE_SIZE`]; larger than
    /// [`MAX_PAGE_SIZE`] is clamped. The page index is clamped so that
    /// `page * size` never exceeds [`MAX_OFFSET`].
    pub fn new(page: u64, size: u64, sort: Sort) -> Self {
        let size = match size {
            0 => DEFAULT_PAGE_SIZE,
            s => s.min(MAX_PAGE_SIZE),
        };
        let page = page.min(MAX_OFFSET / size);
        Self { page, size, sort }
    }

    pub fn of(page: u64, size: u64) -> Self {
        Self::new(page, size, Sort::default())
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_OFFSET)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One page of results plus totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Matching items across all pages
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based index of this page
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        Self {
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}
