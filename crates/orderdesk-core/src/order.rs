//! # Order Draft
//!
//! The order being assembled on the "create order" form.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Draft Lifecycle                                │
//! │                                                                         │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐             │
//! │  │  Client  │──►│  Maker   │──►│ Products │──►│  Media   │             │
//! │  │  picked  │   │  picked  │   │ + grids  │   │ + sample │             │
//! │  └──────────┘   └──────────┘   └──────────┘   └────┬─────┘             │
//! │                                                    │                    │
//! │                          ┌─────────────────────────┴──────┐             │
//! │                          ▼                                ▼             │
//! │                   save_as_draft()                     submit()          │
//! │                   DRAFT-20261016-3F2A9C               ORD-20261016-3F2A9C│
//! │                   (still editable)                    (frozen)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A product appears at most once; its line items are exactly the
//!   combinations generated when it was added, in generation order
//! - Line items are only destroyed by removing their product
//! - Quantities stay within `0..=MAX_LINE_QUANTITY`
//! - Once submitted, nothing but the sample request can change

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::distribution::distribute_evenly;
use crate::error::{CoreError, CoreResult};
use crate::notification::{NotificationKind, OrderNotification};
use crate::sample::{SampleAction, SampleRequest};
use crate::types::{
    order_number, Client, Manufacturer, OrderStatus, Product, ReferenceMedia, Role,
};
use crate::validation::{validate_file_name, validate_notes};
use crate::variants::{generate_combinations, EmptyDimensionPolicy, VariantCombination, VariantDimension};
use crate::{MAX_LINE_QUANTITY, MAX_PRODUCTS_PER_ORDER};

// =============================================================================
// Line Item
// =============================================================================

/// Quantity ordered for one variant combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    pub combination: VariantCombination,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl OrderLineItem {
    /// A fresh line with quantity 0.
    pub fn empty(combination: VariantCombination) -> Self {
        OrderLineItem {
            combination,
            quantity: 0,
            notes: None,
        }
    }

    /// Combination key of this line.
    pub fn key(&self) -> String {
        self.combination.key()
    }
}

// =============================================================================
// Order Product
// =============================================================================

/// A product inside an order, with its variant grid.
///
/// Uses the snapshot pattern: sku, name and dimensions are frozen when the
/// product is added, so later catalog edits do not reshuffle the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderProduct {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    /// Dimension order captured when the product was added.
    pub dimensions: Vec<VariantDimension>,
    pub policy: EmptyDimensionPolicy,
    pub line_items: Vec<OrderLineItem>,
    pub notes: Option<String>,
}

impl OrderProduct {
    /// Snapshots a catalog product and creates one empty line per combination.
    ///
    /// ## Errors
    /// - Invalid sku, name or dimensions
    /// - [`CoreError::NoCombinations`] when the policy leaves nothing to order
    pub fn from_product(product: &Product, policy: EmptyDimensionPolicy) -> CoreResult<Self> {
        product.validate()?;

        let combinations = generate_combinations(&product.dimensions, policy);
        if combinations.is_empty() {
            return Err(CoreError::NoCombinations(product.sku.clone()));
        }

        Ok(OrderProduct {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            dimensions: product.dimensions.clone(),
            policy,
            line_items: combinations.into_iter().map(OrderLineItem::empty).collect(),
            notes: None,
        })
    }

    /// Sum of all line quantities.
    pub fn total_units(&self) -> i64 {
        self.line_items.iter().map(|l| l.quantity).sum()
    }

    /// Combination keys in grid order.
    pub fn keys(&self) -> Vec<String> {
        self.line_items.iter().map(OrderLineItem::key).collect()
    }

    /// Finds a line by combination key.
    pub fn line_item(&self, key: &str) -> Option<&OrderLineItem> {
        self.line_items.iter().find(|l| l.combination.key() == key)
    }

    fn line_item_mut(&mut self, key: &str) -> CoreResult<&mut OrderLineItem> {
        self.line_items
            .iter_mut()
            .find(|l| l.combination.key() == key)
            .ok_or_else(|| CoreError::CombinationNotFound {
                product_id: self.product_id.clone(),
                key: key.to_string(),
            })
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The order being built.
///
/// Every edit goes through a targeted setter that checks the draft is still
/// editable and bumps `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDraft {
    id: String,
    order_number: Option<String>,
    status: OrderStatus,
    /// Admin user building the order.
    created_by: String,
    client: Option<Client>,
    manufacturer: Option<Manufacturer>,
    products: Vec<OrderProduct>,
    media: Vec<ReferenceMedia>,
    sample_request: Option<SampleRequest>,
    notes: Option<String>,
    #[ts(as = "Option<String>")]
    due_date: Option<NaiveDate>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[ts(as = "String")]
    updated_at: DateTime<Utc>,
}

/// Snapshot handed to the persistence collaborator on save or submit.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRecord {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub created_by: String,
    pub client_id: Option<String>,
    pub manufacturer_id: Option<String>,
    pub products: Vec<OrderProduct>,
    pub media: Vec<ReferenceMedia>,
    pub sample_request: Option<SampleRequest>,
    pub notes: Option<String>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub total_units: i64,
    #[ts(as = "String")]
    pub saved_at: DateTime<Utc>,
}

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    pub record: OrderRecord,
    pub notifications: Vec<OrderNotification>,
}

impl OrderDraft {
    /// Starts an empty draft for the given admin.
    pub fn new(created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        OrderDraft {
            id: Uuid::new_v4().to_string(),
            order_number: None,
            status: OrderStatus::Draft,
            created_by: created_by.into(),
            client: None,
            manufacturer: None,
            products: Vec::new(),
            media: Vec::new(),
            sample_request: None,
            notes: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    pub fn manufacturer(&self) -> Option<&Manufacturer> {
        self.manufacturer.as_ref()
    }

    pub fn products(&self) -> &[OrderProduct] {
        &self.products
    }

    pub fn product(&self, product_id: &str) -> Option<&OrderProduct> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    pub fn media(&self) -> &[ReferenceMedia] {
        &self.media
    }

    pub fn sample_request(&self) -> Option<&SampleRequest> {
        self.sample_request.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Drafts are editable, submitted orders are not.
    pub fn is_editable(&self) -> bool {
        self.status == OrderStatus::Draft
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Units across every product.
    pub fn total_units(&self) -> i64 {
        self.products.iter().map(OrderProduct::total_units).sum()
    }

    /// Units for one product, `None` if it is not in the order.
    pub fn product_units(&self, product_id: &str) -> Option<i64> {
        self.product(product_id).map(OrderProduct::total_units)
    }

    /// Number of variant lines across every product.
    pub fn line_count(&self) -> usize {
        self.products.iter().map(|p| p.line_items.len()).sum()
    }

    // -------------------------------------------------------------------------
    // Parties
    // -------------------------------------------------------------------------

    /// Picks (or replaces) the client.
    pub fn select_client(&mut self, client: &Client) -> CoreResult<()> {
        self.ensure_editable()?;
        self.client = Some(client.clone());
        self.touch();
        Ok(())
    }

    /// Picks (or replaces) the manufacturer.
    pub fn select_manufacturer(&mut self, manufacturer: &Manufacturer) -> CoreResult<()> {
        self.ensure_editable()?;
        self.manufacturer = Some(manufacturer.clone());
        self.touch();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Adds a product with one empty line per variant combination.
    ///
    /// ## User Workflow
    /// ```text
    /// Product picker: "Crew Tee" (Color × Size)
    ///      │
    ///      ▼
    /// add_product() ← THIS FUNCTION
    ///      │
    ///      ├── inactive?            → ProductInactive
    ///      ├── already in order?    → ProductAlreadyInOrder
    ///      ├── 50 products already? → TooManyProducts
    ///      └── OK → grid Red/S .. Blue/L, all 0
    /// ```
    pub fn add_product(
        &mut self,
        product: &Product,
        policy: EmptyDimensionPolicy,
    ) -> CoreResult<&OrderProduct> {
        self.ensure_editable()?;

        if !product.is_active {
            return Err(CoreError::ProductInactive(product.id.clone()));
        }
        if self.product(&product.id).is_some() {
            return Err(CoreError::ProductAlreadyInOrder(product.id.clone()));
        }
        if self.products.len() >= MAX_PRODUCTS_PER_ORDER {
            return Err(CoreError::TooManyProducts {
                max: MAX_PRODUCTS_PER_ORDER,
            });
        }

        let order_product = OrderProduct::from_product(product, policy)?;
        self.products.push(order_product);
        self.touch();

        let last = self.products.len() - 1;
        Ok(&self.products[last])
    }

    /// Removes a product, its lines, and any media scoped to it.
    pub fn remove_product(&mut self, product_id: &str) -> CoreResult<OrderProduct> {
        self.ensure_editable()?;

        let idx = self
            .products
            .iter()
            .position(|p| p.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotInOrder(product_id.to_string()))?;

        let removed = self.products.remove(idx);
        self.media
            .retain(|m| m.product_id.as_deref() != Some(product_id));
        self.touch();
        Ok(removed)
    }

    /// Sets the quantity on one variant line.
    pub fn set_quantity(&mut self, product_id: &str, key: &str, quantity: i64) -> CoreResult<()> {
        self.ensure_editable()?;
        check_line_quantity(quantity)?;

        self.product_mut(product_id)?.line_item_mut(key)?.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Spreads `total` evenly over every line of a product.
    ///
    /// Existing quantities are overwritten. The first lines (grid order)
    /// receive the remainder.
    pub fn quick_fill(&mut self, product_id: &str, total: i64) -> CoreResult<()> {
        self.ensure_editable()?;

        let product = self.product_mut(product_id)?;
        let shares = distribute_evenly(total, product.line_items.len())?;
        if let Some(&largest) = shares.first() {
            check_line_quantity(largest)?;
        }

        for (line, share) in product.line_items.iter_mut().zip(shares) {
            line.quantity = share;
        }

        self.touch();
        Ok(())
    }

    /// Resets every line of a product to zero.
    pub fn clear_quantities(&mut self, product_id: &str) -> CoreResult<()> {
        self.ensure_editable()?;

        for line in &mut self.product_mut(product_id)?.line_items {
            line.quantity = 0;
        }

        self.touch();
        Ok(())
    }

    pub fn set_line_notes(
        &mut self,
        product_id: &str,
        key: &str,
        notes: Option<String>,
    ) -> CoreResult<()> {
        self.ensure_editable()?;
        let notes = clean_notes(notes)?;

        self.product_mut(product_id)?.line_item_mut(key)?.notes = notes;
        self.touch();
        Ok(())
    }

    pub fn set_product_notes(&mut self, product_id: &str, notes: Option<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        let notes = clean_notes(notes)?;

        self.product_mut(product_id)?.notes = notes;
        self.touch();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Order-level fields
    // -------------------------------------------------------------------------

    pub fn set_order_notes(&mut self, notes: Option<String>) -> CoreResult<()> {
        self.ensure_editable()?;
        self.notes = clean_notes(notes)?;
        self.touch();
        Ok(())
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) -> CoreResult<()> {
        self.ensure_editable()?;
        self.due_date = due_date;
        self.touch();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Media
    // -------------------------------------------------------------------------

    /// Attaches an uploaded reference file.
    ///
    /// Product-scoped media must point at a product already in the order.
    pub fn attach_media(&mut self, media: ReferenceMedia) -> CoreResult<()> {
        self.ensure_editable()?;
        validate_file_name(&media.file_name)?;

        if let Some(product_id) = media.product_id.as_deref() {
            if self.product(product_id).is_none() {
                return Err(CoreError::ProductNotInOrder(product_id.to_string()));
            }
        }

        self.media.push(media);
        self.touch();
        Ok(())
    }

    /// Detaches a reference file and returns it so the caller can delete
    /// the stored object.
    pub fn detach_media(&mut self, media_id: &str) -> CoreResult<ReferenceMedia> {
        self.ensure_editable()?;

        let idx = self
            .media
            .iter()
            .position(|m| m.id == media_id)
            .ok_or_else(|| CoreError::MediaNotFound(media_id.to_string()))?;

        let removed = self.media.remove(idx);
        self.touch();
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Sample request
    // -------------------------------------------------------------------------

    pub fn attach_sample_request(&mut self, sample: SampleRequest) -> CoreResult<()> {
        self.ensure_editable()?;
        if self.sample_request.is_some() {
            return Err(CoreError::SampleRequestExists);
        }

        self.sample_request = Some(sample);
        self.touch();
        Ok(())
    }

    pub fn remove_sample_request(&mut self) -> CoreResult<SampleRequest> {
        self.ensure_editable()?;
        let sample = self.sample_request.take().ok_or(CoreError::NoSampleRequest)?;
        self.touch();
        Ok(sample)
    }

    /// Moves the sample request along and builds the notification row for
    /// the party that now holds it.
    ///
    /// Allowed on submitted orders: sample routing continues after submit.
    pub fn advance_sample(
        &mut self,
        actor: Role,
        action: SampleAction,
        note: Option<String>,
    ) -> CoreResult<OrderNotification> {
        let sample = self
            .sample_request
            .as_mut()
            .ok_or(CoreError::NoSampleRequest)?;
        let transition = sample.apply(actor, action, note)?;

        let role = transition.to.notify_role();
        let recipient_id = match role {
            Role::Client => self.client.as_ref().map(|c| c.id.clone()),
            Role::Manufacturer => self.manufacturer.as_ref().map(|m| m.id.clone()),
            Role::Admin => Some(self.created_by.clone()),
        };

        let mut message = format!("Sample request is now {}", transition.to);
        if let Some(note) = &transition.note {
            message.push_str(": ");
            message.push_str(note);
        }

        self.touch();
        Ok(OrderNotification::new(
            role,
            recipient_id,
            NotificationKind::SampleUpdated,
            self.order_number.clone(),
            message,
        ))
    }

    // -------------------------------------------------------------------------
    // Save & submit
    // -------------------------------------------------------------------------

    /// Lists everything that blocks submission; empty means ready.
    pub fn submission_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.client.is_none() {
            problems.push("client is required".to_string());
        }
        if self.manufacturer.is_none() {
            problems.push("manufacturer is required".to_string());
        }
        if self.products.is_empty() {
            problems.push("at least one product is required".to_string());
        }
        for product in &self.products {
            if product.total_units() == 0 {
                problems.push(format!("product {} has no quantities", product.sku));
            }
        }

        if let Some(sample) = &self.sample_request {
            for key in &sample.combination_keys {
                let known = self
                    .products
                    .iter()
                    .any(|p| p.line_item(key).is_some());
                if !known {
                    problems.push(format!("sample combination '{}' is not in the order", key));
                }
            }
        }

        problems
    }

    /// Checks the draft can be submitted.
    pub fn validate_for_submission(&self) -> CoreResult<()> {
        let problems = self.submission_problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::IncompleteOrder { problems })
        }
    }

    /// Saves the draft. The first save assigns a draft number which later
    /// saves keep.
    pub fn save_as_draft(&mut self, prefix: &str) -> CoreResult<OrderRecord> {
        self.ensure_editable()?;

        let number = match &self.order_number {
            Some(number) => number.clone(),
            None => {
                let number = order_number(prefix, Utc::now().date_naive(), &self.id);
                self.order_number = Some(number.clone());
                number
            }
        };

        self.touch();
        Ok(self.record(number))
    }

    /// Submits the order.
    ///
    /// ## Flow
    /// ```text
    /// submit("ORD")
    ///      │
    ///      ├── already submitted? → OrderNotEditable
    ///      ├── problems?          → IncompleteOrder { all of them }
    ///      │
    ///      ▼
    /// status = Submitted, number = ORD-<today>-<id suffix>
    ///      │
    ///      ▼
    /// notifications: manufacturer (new order) + client (order placed)
    /// ```
    pub fn submit(&mut self, prefix: &str) -> CoreResult<Submission> {
        self.ensure_editable()?;
        self.validate_for_submission()?;

        let number = order_number(prefix, Utc::now().date_naive(), &self.id);
        self.order_number = Some(number.clone());
        self.status = OrderStatus::Submitted;
        self.touch();

        let units = self.total_units();
        let mut notifications = Vec::new();

        if let (Some(client), Some(manufacturer)) = (&self.client, &self.manufacturer) {
            notifications.push(OrderNotification::new(
                Role::Manufacturer,
                Some(manufacturer.id.clone()),
                NotificationKind::OrderSubmitted,
                Some(number.clone()),
                format!(
                    "New order {} from {}: {} units across {} products",
                    number,
                    client.company_name,
                    units,
                    self.products.len()
                ),
            ));
            notifications.push(OrderNotification::new(
                Role::Client,
                Some(client.id.clone()),
                NotificationKind::OrderPlaced,
                Some(number.clone()),
                format!("Your order {} has been placed with {}", number, manufacturer.name),
            ));
        }

        Ok(Submission {
            record: self.record(number),
            notifications,
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.is_editable() {
            return Ok(());
        }

        Err(CoreError::OrderNotEditable {
            order_number: self
                .order_number
                .clone()
                .unwrap_or_else(|| self.id.clone()),
            status: self.status.to_string(),
        })
    }

    fn product_mut(&mut self, product_id: &str) -> CoreResult<&mut OrderProduct> {
        self.products
            .iter_mut()
            .find(|p| p.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotInOrder(product_id.to_string()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn record(&self, order_number: String) -> OrderRecord {
        OrderRecord {
            id: self.id.clone(),
            order_number,
            status: self.status,
            created_by: self.created_by.clone(),
            client_id: self.client.as_ref().map(|c| c.id.clone()),
            manufacturer_id: self.manufacturer.as_ref().map(|m| m.id.clone()),
            products: self.products.clone(),
            media: self.media.clone(),
            sample_request: self.sample_request.clone(),
            notes: self.notes.clone(),
            due_date: self.due_date,
            total_units: self.total_units(),
            saved_at: self.updated_at,
        }
    }
}

fn check_line_quantity(quantity: i64) -> CoreResult<()> {
    if quantity < 0 {
        return Err(CoreError::NegativeQuantity(quantity));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested: quantity,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

/// Blank notes become `None`.
fn clean_notes(notes: Option<String>) -> CoreResult<Option<String>> {
    match notes {
        Some(text) if !text.trim().is_empty() => {
            validate_notes(&text)?;
            Ok(Some(text))
        }
        _ => Ok(None),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleStatus;
    use crate::{DEFAULT_DRAFT_PREFIX, DEFAULT_ORDER_PREFIX, STANDARD_COMBINATION};

    fn tee() -> Product {
        Product {
            id: "prod-tee".to_string(),
            sku: "TEE-01".to_string(),
            name: "Crew Tee".to_string(),
            description: None,
            dimensions: vec![
                VariantDimension::new("Color", ["Red", "Blue"]),
                VariantDimension::new("Size", ["S", "M", "L"]),
            ],
            is_active: true,
        }
    }

    fn tote() -> Product {
        Product {
            id: "prod-tote".to_string(),
            sku: "TOTE-01".to_string(),
            name: "Canvas Tote".to_string(),
            description: None,
            dimensions: Vec::new(),
            is_active: true,
        }
    }

    fn client() -> Client {
        Client {
            id: "client-1".to_string(),
            company_name: "Northwind Apparel".to_string(),
            contact_name: Some("Dana".to_string()),
            email: "buying@northwind.test".to_string(),
        }
    }

    fn manufacturer() -> Manufacturer {
        Manufacturer {
            id: "maker-1".to_string(),
            name: "Shenzhen Knitworks".to_string(),
            country: Some("CN".to_string()),
            contact_email: "orders@knitworks.test".to_string(),
        }
    }

    fn ready_draft() -> OrderDraft {
        let mut draft = OrderDraft::new("admin-1");
        draft.select_client(&client()).unwrap();
        draft.select_manufacturer(&manufacturer()).unwrap();
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();
        draft.quick_fill("prod-tee", 100).unwrap();
        draft
    }

    #[test]
    fn test_add_product_creates_empty_grid() {
        let mut draft = OrderDraft::new("admin-1");
        let product = draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        assert_eq!(product.line_items.len(), 6);
        assert!(product.line_items.iter().all(|l| l.quantity == 0));
        assert_eq!(product.keys()[0], "Red/S");
        assert_eq!(draft.line_count(), 6);
    }

    #[test]
    fn test_product_without_variants_gets_standard_line() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tote(), EmptyDimensionPolicy::Skip).unwrap();

        draft.set_quantity("prod-tote", STANDARD_COMBINATION, 40).unwrap();
        assert_eq!(draft.product_units("prod-tote"), Some(40));
    }

    #[test]
    fn test_add_product_rules() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        assert!(matches!(
            draft.add_product(&tee(), EmptyDimensionPolicy::Skip),
            Err(CoreError::ProductAlreadyInOrder(_))
        ));

        let mut inactive = tote();
        inactive.is_active = false;
        assert!(matches!(
            draft.add_product(&inactive, EmptyDimensionPolicy::Skip),
            Err(CoreError::ProductInactive(_))
        ));

        let mut empty_finish = tote();
        empty_finish.dimensions = vec![VariantDimension::new("Finish", Vec::<String>::new())];
        assert!(matches!(
            draft.add_product(&empty_finish, EmptyDimensionPolicy::NoCombinations),
            Err(CoreError::NoCombinations(_))
        ));
    }

    #[test]
    fn test_too_many_products() {
        let mut draft = OrderDraft::new("admin-1");
        for i in 0..MAX_PRODUCTS_PER_ORDER {
            let mut p = tote();
            p.id = format!("p-{}", i);
            draft.add_product(&p, EmptyDimensionPolicy::Skip).unwrap();
        }

        let mut extra = tote();
        extra.id = "p-extra".to_string();
        assert!(matches!(
            draft.add_product(&extra, EmptyDimensionPolicy::Skip),
            Err(CoreError::TooManyProducts { .. })
        ));
    }

    #[test]
    fn test_set_quantity_bounds() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        draft.set_quantity("prod-tee", "Blue/M", 25).unwrap();
        assert_eq!(
            draft.product("prod-tee").unwrap().line_item("Blue/M").unwrap().quantity,
            25
        );

        assert!(matches!(
            draft.set_quantity("prod-tee", "Blue/M", -3),
            Err(CoreError::NegativeQuantity(-3))
        ));
        assert!(matches!(
            draft.set_quantity("prod-tee", "Blue/M", MAX_LINE_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            draft.set_quantity("prod-tee", "Green/M", 1),
            Err(CoreError::CombinationNotFound { .. })
        ));
        assert!(matches!(
            draft.set_quantity("nope", "Blue/M", 1),
            Err(CoreError::ProductNotInOrder(_))
        ));
    }

    #[test]
    fn test_quick_fill_sums_to_total() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        draft.quick_fill("prod-tee", 100).unwrap();
        let product = draft.product("prod-tee").unwrap();
        let quantities: Vec<i64> = product.line_items.iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![17, 17, 17, 17, 16, 16]);
        assert_eq!(draft.total_units(), 100);

        draft.clear_quantities("prod-tee").unwrap();
        assert_eq!(draft.total_units(), 0);
    }

    #[test]
    fn test_quick_fill_rejects_oversized_lines() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tote(), EmptyDimensionPolicy::Skip).unwrap();
        assert!(matches!(
            draft.quick_fill("prod-tote", MAX_LINE_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(draft.total_units(), 0);
    }

    #[test]
    fn test_notes_blank_becomes_none() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        draft
            .set_line_notes("prod-tee", "Red/S", Some("Woven label".into()))
            .unwrap();
        draft.set_product_notes("prod-tee", Some("   ".into())).unwrap();
        draft.set_order_notes(Some("Ship by sea".into())).unwrap();

        let product = draft.product("prod-tee").unwrap();
        assert_eq!(
            product.line_item("Red/S").unwrap().notes.as_deref(),
            Some("Woven label")
        );
        assert!(product.notes.is_none());
        assert_eq!(draft.notes(), Some("Ship by sea"));
    }

    #[test]
    fn test_remove_product_drops_its_media() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();
        draft
            .attach_media(ReferenceMedia::new(
                "tee-front.png",
                "orders/tee-front.png",
                Some("prod-tee".into()),
            ))
            .unwrap();
        draft
            .attach_media(ReferenceMedia::new("brand.pdf", "orders/brand.pdf", None))
            .unwrap();

        let removed = draft.remove_product("prod-tee").unwrap();
        assert_eq!(removed.line_items.len(), 6);
        assert_eq!(draft.media().len(), 1);
        assert_eq!(draft.media()[0].file_name, "brand.pdf");
    }

    #[test]
    fn test_media_must_target_product_in_order() {
        let mut draft = OrderDraft::new("admin-1");
        let media = ReferenceMedia::new("x.png", "orders/x.png", Some("ghost".into()));
        assert!(matches!(
            draft.attach_media(media),
            Err(CoreError::ProductNotInOrder(_))
        ));

        let media = ReferenceMedia::new("x.png", "orders/x.png", None);
        let id = media.id.clone();
        draft.attach_media(media).unwrap();
        assert_eq!(draft.detach_media(&id).unwrap().file_name, "x.png");
        assert!(matches!(
            draft.detach_media(&id),
            Err(CoreError::MediaNotFound(_))
        ));
    }

    #[test]
    fn test_submission_lists_every_problem() {
        let mut draft = OrderDraft::new("admin-1");
        draft.add_product(&tee(), EmptyDimensionPolicy::Skip).unwrap();

        match draft.submit(DEFAULT_ORDER_PREFIX) {
            Err(CoreError::IncompleteOrder { problems }) => {
                assert_eq!(
                    problems,
                    vec![
                        "client is required",
                        "manufacturer is required",
                        "product TEE-01 has no quantities",
                    ]
                );
            }
            other => panic!("expected IncompleteOrder, got {:?}", other),
        }
        assert_eq!(draft.status(), OrderStatus::Draft);
    }

    #[test]
    fn test_draft_number_is_stable_across_saves() {
        let mut draft = OrderDraft::new("admin-1");
        let first = draft.save_as_draft(DEFAULT_DRAFT_PREFIX).unwrap();
        let second = draft.save_as_draft(DEFAULT_DRAFT_PREFIX).unwrap();

        assert!(first.order_number.starts_with("DRAFT-"));
        assert_eq!(first.order_number, second.order_number);
        assert_eq!(second.status, OrderStatus::Draft);
    }

    #[test]
    fn test_submit_freezes_order_and_notifies() {
        let mut draft = ready_draft();
        let saved = draft.save_as_draft(DEFAULT_DRAFT_PREFIX).unwrap();

        let submission = draft.submit(DEFAULT_ORDER_PREFIX).unwrap();
        let record = &submission.record;

        assert_eq!(record.status, OrderStatus::Submitted);
        assert!(record.order_number.starts_with("ORD-"));
        // same id suffix as the draft number
        assert_eq!(
            record.order_number.rsplit('-').next(),
            saved.order_number.rsplit('-').next()
        );
        assert_eq!(record.total_units, 100);
        assert_eq!(record.client_id.as_deref(), Some("client-1"));

        assert_eq!(submission.notifications.len(), 2);
        assert_eq!(submission.notifications[0].recipient_role, Role::Manufacturer);
        assert_eq!(
            submission.notifications[0].kind,
            NotificationKind::OrderSubmitted
        );
        assert_eq!(submission.notifications[1].recipient_id.as_deref(), Some("client-1"));

        assert!(!draft.is_editable());
        assert!(matches!(
            draft.set_quantity("prod-tee", "Red/S", 1),
            Err(CoreError::OrderNotEditable { .. })
        ));
        assert!(matches!(
            draft.submit(DEFAULT_ORDER_PREFIX),
            Err(CoreError::OrderNotEditable { .. })
        ));
    }

    #[test]
    fn test_sample_combinations_must_exist() {
        let mut draft = ready_draft();
        let sample = SampleRequest::new(1, None)
            .unwrap()
            .with_combinations(["Red/M", "Green/M"]);
        draft.attach_sample_request(sample).unwrap();

        let problems = draft.submission_problems();
        assert_eq!(problems, vec!["sample combination 'Green/M' is not in the order"]);
    }

    #[test]
    fn test_sample_routing_after_submit() {
        let mut draft = ready_draft();
        draft
            .attach_sample_request(SampleRequest::new(2, None).unwrap())
            .unwrap();
        assert!(matches!(
            draft.attach_sample_request(SampleRequest::new(1, None).unwrap()),
            Err(CoreError::SampleRequestExists)
        ));

        draft.submit(DEFAULT_ORDER_PREFIX).unwrap();

        let notification = draft
            .advance_sample(Role::Admin, SampleAction::ForwardToManufacturer, None)
            .unwrap();
        assert_eq!(notification.recipient_role, Role::Manufacturer);
        assert_eq!(notification.recipient_id.as_deref(), Some("maker-1"));
        assert_eq!(notification.kind, NotificationKind::SampleUpdated);
        assert!(notification.order_number.is_some());
        assert_eq!(
            draft.sample_request().unwrap().status(),
            SampleStatus::WithManufacturer
        );

        let notification = draft
            .advance_sample(
                Role::Manufacturer,
                SampleAction::StartProduction,
                Some("Cutting fabric".into()),
            )
            .unwrap();
        assert_eq!(notification.recipient_role, Role::Admin);
        assert_eq!(notification.recipient_id.as_deref(), Some("admin-1"));
        assert_eq!(
            notification.message,
            "Sample request is now in production: Cutting fabric"
        );
    }

    #[test]
    fn test_advance_without_sample() {
        let mut draft = OrderDraft::new("admin-1");
        assert!(matches!(
            draft.advance_sample(Role::Admin, SampleAction::Cancel, None),
            Err(CoreError::NoSampleRequest)
        ));
    }

    #[test]
    fn test_draft_round_trips_through_json() {
        let draft = ready_draft();
        let json = serde_json::to_string(&draft).unwrap();
        let restored: OrderDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id(), draft.id());
        assert_eq!(restored.total_units(), 100);
        assert_eq!(restored.products(), draft.products());
    }
}
