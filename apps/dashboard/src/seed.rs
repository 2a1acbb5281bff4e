//! # Demo Data
//!
//! The in-memory records every session starts with: three accounts (one
//! per role), a catalogue, a few days of sales and two bulk orders.
//!
//! Sales and orders are built through the same core operations the
//! commands use, so seeded data obeys the same rules as live data.

use bakery_core::{
    Account, BulkOrderBook, BulkOrderStatus, Cart, Catalogue, CheckoutRequest, Company, CoreError,
    CoreResult, Money, NewBulkOrder, OrderDraft, PaymentMethod, ProductDraft, Role, SalesLedger,
    UserDirectory,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tracing::debug;

/// The records a fresh dashboard starts with.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: UserDirectory,
    pub catalogue: Catalogue,
    pub sales: SalesLedger,
    pub bulk_orders: BulkOrderBook,
    pub company: Company,
}

/// Builds the demo data relative to `now`.
pub fn demo_data(now: DateTime<Utc>) -> CoreResult<SeedData> {
    let users = demo_users();
    let catalogue = demo_catalogue(now)?;
    let sales = demo_sales(&catalogue, &users, now)?;
    let bulk_orders = demo_bulk_orders(&catalogue, now)?;

    debug!(
        users = users.list().len(),
        products = catalogue.len(),
        sales = sales.len(),
        bulk_orders = bulk_orders.len(),
        "Demo data built"
    );

    Ok(SeedData {
        users,
        catalogue,
        sales,
        bulk_orders,
        company: demo_company(),
    })
}

pub fn demo_users() -> UserDirectory {
    let created_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let account = |id: &str, name: &str, email: &str, role: Role| Account {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        is_active: true,
        created_at,
    };

    UserDirectory::from_accounts(vec![
        account("1", "John Admin", "admin@bakery.com", Role::Admin),
        account("2", "Sarah Manager", "manager@bakery.com", Role::Manager),
        account("3", "Mike Staff", "staff@bakery.com", Role::Staff),
    ])
}

pub fn demo_company() -> Company {
    Company {
        name: "Sweet Bakery".to_string(),
        address: "12 MG Road, Bengaluru, Karnataka 560001".to_string(),
        phone: "+91 80 4123 4567".to_string(),
        email: "hello@sweetbakery.in".to_string(),
        gst: Some("29ABCDE1234F1Z5".to_string()),
    }
}

pub fn demo_catalogue(now: DateTime<Utc>) -> CoreResult<Catalogue> {
    let items: [(&str, &str, &str, i64, i64, i64); 8] = [
        ("Chocolate Truffle Cake", "Cakes", "Rich dark chocolate, 500g", 450, 12, 3),
        ("Black Forest Cake", "Cakes", "Cherries and cream, 500g", 400, 2, 3),
        ("Whole Wheat Bread", "Bread", "400g loaf", 45, 30, 10),
        ("Butter Croissant", "Pastries", "", 60, 25, 8),
        ("Chocolate Chip Cookies", "Cookies", "Pack of 6", 120, 40, 10),
        ("Blueberry Muffin", "Muffins", "", 70, 6, 6),
        ("Glazed Donut", "Donuts", "", 50, 0, 5),
        ("Veg Puff", "Pastries", "Spiced potato filling", 25, 50, 15),
    ];

    let mut catalogue = Catalogue::new();
    for (name, category, description, rupees, stock, min_stock) in items {
        catalogue.add_product(
            ProductDraft {
                name: name.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                price: Money::from_rupees(rupees),
                stock,
                min_stock,
            },
            now,
        )?;
    }
    Ok(catalogue)
}

/// Sales over the last few days, by product index and quantity.
pub fn demo_sales(
    catalogue: &Catalogue,
    users: &UserDirectory,
    now: DateTime<Utc>,
) -> CoreResult<SalesLedger> {
    let products = catalogue.all();
    let staff = |id: &str| {
        users
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| CoreError::AccountNotFound(id.to_string()))
    };
    let mike = staff("3")?;
    let sarah = staff("2")?;

    let history: [(i64, &Account, &[(usize, i64)], i64, PaymentMethod, Option<&str>); 5] = [
        (96, &sarah, &[(0, 1), (4, 2)], 50, PaymentMethod::Card, Some("Rahul Mehta")),
        (50, &mike, &[(2, 2), (3, 4)], 0, PaymentMethod::Cash, None),
        (26, &mike, &[(7, 6), (5, 2)], 0, PaymentMethod::Upi, None),
        (3, &mike, &[(3, 2), (4, 1)], 0, PaymentMethod::Cash, Some("Anita Rao")),
        (1, &sarah, &[(1, 1)], 20, PaymentMethod::Upi, None),
    ];

    let mut ledger = SalesLedger::new();
    for (hours_ago, who, lines, discount, payment_method, customer) in history {
        let mut cart = Cart::new();
        for (index, qty) in lines {
            if let Some(product) = products.get(*index) {
                cart.add_line(product, *qty)?;
            }
        }
        ledger.checkout(
            &mut cart,
            CheckoutRequest {
                discount: Money::from_rupees(discount),
                payment_method,
                customer_name: customer.map(str::to_string),
                customer_phone: None,
            },
            who,
            now - Duration::hours(hours_ago),
        )?;
    }
    Ok(ledger)
}

pub fn demo_bulk_orders(catalogue: &Catalogue, now: DateTime<Utc>) -> CoreResult<BulkOrderBook> {
    let products = catalogue.all();
    let today: NaiveDate = now.date_naive();
    let mut book = BulkOrderBook::new();

    let orders: [(&str, &str, i64, &[(usize, i64)], i64, &str, BulkOrderStatus); 2] = [
        (
            "Priya Sharma",
            "9876543210",
            2,
            &[(0, 2), (4, 10)],
            500,
            "Birthday party, write 'Happy 30th Priya'",
            BulkOrderStatus::Confirmed,
        ),
        (
            "Infosys Cafeteria",
            "9845012345",
            5,
            &[(3, 100), (7, 150)],
            2000,
            "",
            BulkOrderStatus::Pending,
        ),
    ];

    for (name, phone, days_ahead, lines, advance, notes, status) in orders {
        let mut draft = OrderDraft::new();
        for (index, qty) in lines {
            if let Some(product) = products.get(*index) {
                draft.add_item(product)?;
                draft.set_quantity(&product.id, *qty)?;
            }
        }
        let id = book
            .create(
                NewBulkOrder {
                    customer_name: name.to_string(),
                    customer_phone: phone.to_string(),
                    delivery_date: Some(today + Duration::days(days_ahead)),
                    advance_paid: Money::from_rupees(advance),
                    notes: Some(notes.to_string()),
                },
                &draft,
                now - Duration::days(1),
            )?
            .id
            .clone();
        book.update_status(&id, status)?;
    }
    Ok(book)
}
