use chrono::NaiveDate;
use warung_core::journal::{HUTANG_USAHA, KAS, MODAL};
use warung_core::{
    Cart, ExpenseCategory, JournalKind, JournalLine, ManualJournal, Money, NewExpense,
    NewTransaction, PaymentMethod, PaymentStatus, ReportPeriod, Tender, TransactionItem,
    TransactionKind,
};
use warung_store::{
    Books, BooksSettings, ExpenseFilter, JournalFilter, PurchaseFilter, PurchaseLine,
    PurchaseOrder, StoreError, TransactionFilter,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn rp(v: i64) -> Money {
    Money::from_rupiah(v)
}

fn purchase(day: u32, name: &str, qty: i64, cost: i64, status: PaymentStatus) -> PurchaseOrder {
    PurchaseOrder {
        date: d(day),
        supplier: "UD Sembako Jaya".to_string(),
        description: format!("Stok {name}"),
        status,
        payment_method: None,
        items: vec![PurchaseLine {
            name: name.to_string(),
            category: "Sembako".to_string(),
            quantity: qty,
            cost: rp(cost),
        }],
    }
}

/// Capital, two purchases (one on credit), one cash sale, two expenses
/// (one unpaid).
fn month_of_trading() -> Books {
    let mut books = Books::default();

    books
        .add_manual_journal(ManualJournal {
            date: d(1),
            description: "Setoran modal".to_string(),
            reference: "MODAL-01".to_string(),
            debit: vec![JournalLine::new(KAS, rp(1_000_000))],
            credit: vec![JournalLine::new(MODAL, rp(1_000_000))],
        })
        .unwrap();
    books
        .record_purchase(purchase(2, "Beras 5kg", 10, 60_000, PaymentStatus::Lunas))
        .unwrap();
    books
        .record_purchase(purchase(3, "Minyak Goreng 1L", 20, 15_000, PaymentStatus::BelumLunas))
        .unwrap();

    let beras = books.find_product("Beras 5kg").unwrap().clone();
    let minyak = books.find_product("Minyak Goreng 1L").unwrap().clone();
    let mut cart = Cart::new();
    cart.add_product(&beras).unwrap();
    cart.add_product(&beras).unwrap();
    cart.add_product(&minyak).unwrap();
    cart.update_quantity(&minyak, 3).unwrap();
    books
        .checkout(&mut cart, Tender::cash(rp(250_000)), d(17))
        .unwrap();

    books
        .record_expense(NewExpense {
            date: d(17),
            description: "Listrik".to_string(),
            amount: rp(100_000),
            category: ExpenseCategory::Operasional,
            status: PaymentStatus::Lunas,
        })
        .unwrap();
    books
        .record_expense(NewExpense {
            date: d(17),
            description: "Gaji penjaga".to_string(),
            amount: rp(200_000),
            category: ExpenseCategory::Operasional,
            status: PaymentStatus::BelumLunas,
        })
        .unwrap();

    books
}

#[test]
fn test_fresh_start_reports_are_zero() {
    let books = Books::default();

    let dashboard = books.dashboard(d(17));
    assert!(dashboard.is_fresh_start);

    let summary = books.financial_summary(ReportPeriod::All, d(17));
    assert_eq!(summary.total_revenue, Money::zero());
    assert_eq!(summary.equity, Money::zero());
    assert!(books.balance_sheet(ReportPeriod::All, d(17)).is_balanced());
}

#[test]
fn test_purchase_prices_new_products_with_markup() {
    let books = month_of_trading();

    let beras = books.find_product("beras 5kg").unwrap();
    assert_eq!(beras.price, rp(78_000));
    assert_eq!(beras.stock, 8);
    assert_eq!(beras.min_stock, 5);

    let minyak = books.find_product("Minyak Goreng 1L").unwrap();
    assert_eq!(minyak.price, rp(19_500));
    assert_eq!(minyak.stock, 17);
}

#[test]
fn test_sale_receipt_and_journal() {
    let books = month_of_trading();

    let sales = books.transactions(&TransactionFilter::default());
    assert_eq!(sales.len(), 1);
    let sale = sales[0];
    assert_eq!(sale.id, "TRX000001");
    assert_eq!(sale.amount, rp(214_500));
    assert_eq!(sale.change, Some(rp(35_500)));
    assert_eq!(sale.payment_method, Some(PaymentMethod::Tunai));
    assert_eq!(sale.description, "Beras 5kg (2), Minyak Goreng 1L (3)");

    let automatic = books.journal_entries(
        &JournalFilter::new(ReportPeriod::All, d(17)).with_kind(JournalKind::Automatic),
    );
    assert_eq!(automatic.len(), 5);
    assert!(automatic.iter().all(|e| e.is_balanced()));
    assert!(automatic.iter().any(|e| e.reference == "TRX000001"));
}

#[test]
fn test_financial_summary_over_a_month() {
    let books = month_of_trading();
    let s = books.financial_summary(ReportPeriod::ThisMonth, d(17));

    assert_eq!(s.total_revenue, rp(214_500));
    assert_eq!(s.total_cogs, rp(165_000));
    assert_eq!(s.gross_profit, rp(49_500));
    assert_eq!(s.total_expenses, rp(100_000));
    assert_eq!(s.net_income, rp(-50_500));
    assert_eq!(s.total_purchases, rp(600_000));
    assert_eq!(s.cash, rp(-485_500));
    assert_eq!(s.inventory_value, rp(735_000));
    assert_eq!(s.total_assets, rp(735_000));
    assert_eq!(s.total_liabilities, rp(300_000));
    assert_eq!(s.equity, rp(435_000));
}

#[test]
fn test_balance_sheet_balances() {
    let books = month_of_trading();

    let balances = books.account_balances(ReportPeriod::All, d(17));
    assert_eq!(balances.kas, Money::zero());
    assert_eq!(balances.peralatan, rp(60_000));
    assert_eq!(balances.hutang_usaha, rp(300_000));
    assert_eq!(balances.hutang_bank, rp(200_000));

    let sheet = books.balance_sheet(ReportPeriod::All, d(17));
    assert_eq!(sheet.total_assets, rp(795_000));
    assert_eq!(sheet.total_liabilities, rp(500_000));
    assert_eq!(sheet.equity, rp(295_000));
    assert!(sheet.is_balanced());
}

#[test]
fn test_cash_flow_agrees_with_trial_balance() {
    let books = month_of_trading();

    let cf = books.cash_flow(ReportPeriod::ThisMonth, d(17));
    assert_eq!(cf.opening_cash, Money::zero());
    assert_eq!(cf.operating, rp(-485_500));
    assert_eq!(cf.investing, Money::zero());
    assert_eq!(cf.financing, rp(1_000_000));
    assert_eq!(cf.closing_cash, rp(514_500));

    let tb = books.trial_balance(&JournalFilter::new(ReportPeriod::All, d(17)));
    assert!(tb.is_balanced());
    assert_eq!(tb.row(KAS).unwrap().balance, cf.closing_cash);
    assert_eq!(tb.row(HUTANG_USAHA).unwrap().balance, rp(500_000));

    // next month opens with this month's closing cash
    let june = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let next = books.cash_flow(ReportPeriod::ThisMonth, june);
    assert_eq!(next.opening_cash, rp(514_500));
    assert_eq!(next.net_change, Money::zero());
}

#[test]
fn test_income_statement_by_category() {
    let books = month_of_trading();
    let stmt = books.income_statement(ReportPeriod::All, d(17));

    let operasional = stmt
        .expenses
        .iter()
        .find(|l| l.category == ExpenseCategory::Operasional)
        .unwrap();
    assert_eq!(operasional.amount, rp(100_000));
    assert_eq!(stmt.total_expenses, rp(100_000));
    assert_eq!(stmt.net_income, rp(-50_500));
}

#[test]
fn test_list_stats() {
    let books = month_of_trading();

    let purchases = books.purchase_stats(&PurchaseFilter::default());
    assert_eq!(purchases.count, 2);
    assert_eq!(purchases.total, rp(900_000));
    assert_eq!(purchases.unpaid_total, rp(300_000));

    let unpaid = books.purchases(&PurchaseFilter {
        query: Some("sembako".to_string()),
        status: Some(PaymentStatus::BelumLunas),
    });
    assert_eq!(unpaid.len(), 1);
    assert_eq!(unpaid[0].id, "PUR000002");

    let expenses = books.expense_stats(&ExpenseFilter::default());
    assert_eq!(expenses.total, rp(300_000));
    assert_eq!(expenses.unpaid, rp(200_000));

    let inventory = books.inventory_stats();
    assert_eq!(inventory.total_products, 2);
    assert_eq!(inventory.retail_value, rp(8 * 78_000 + 17 * 19_500));

    let trx = books.transaction_stats(&TransactionFilter::default());
    assert_eq!(trx.sales_total, rp(214_500));
}

#[test]
fn test_direct_sale_beyond_stock_floors_at_zero() {
    let mut books = month_of_trading();
    let beras = books.find_product("Beras 5kg").unwrap().clone();

    books
        .record_transaction(NewTransaction {
            date: d(17),
            customer: "Warung Bu Tini".to_string(),
            kind: TransactionKind::Penjualan,
            amount: rp(780_000),
            description: "Grosir beras".to_string(),
            status: PaymentStatus::BelumLunas,
            items: vec![TransactionItem {
                product_id: beras.id.clone(),
                product_name: beras.name.clone(),
                quantity: 10,
                price: beras.price,
                cost: Some(beras.cost),
            }],
            payment_method: None,
            cash_received: None,
            change: None,
        })
        .unwrap();

    assert_eq!(books.product(&beras.id).unwrap().stock, 0);
    assert_eq!(
        books.account_balances(ReportPeriod::All, d(17)).piutang,
        rp(780_000)
    );
}

#[test]
fn test_unbalanced_manual_journal_is_rejected() {
    let mut books = month_of_trading();
    let before = books.store().journal().len();

    let err = books
        .add_manual_journal(ManualJournal {
            date: d(17),
            description: "Salah ketik".to_string(),
            reference: "X-1".to_string(),
            debit: vec![JournalLine::new(KAS, rp(100_000))],
            credit: vec![JournalLine::new(MODAL, rp(10_000))],
        })
        .unwrap_err();

    assert!(matches!(err, StoreError::Core(_)));
    assert_eq!(books.store().journal().len(), before);
}

#[test]
fn test_custom_settings_flow_into_books() {
    let mut books = Books::new(BooksSettings {
        walk_in_customer: "Umum".to_string(),
        default_min_stock: 2,
        purchase_markup_bps: 5000,
    });
    books
        .record_purchase(purchase(2, "Sabun Mandi", 12, 4_000, PaymentStatus::Lunas))
        .unwrap();

    let sabun = books.find_product("Sabun Mandi").unwrap().clone();
    assert_eq!(sabun.price, rp(6_000));
    assert_eq!(sabun.min_stock, 2);

    let mut cart = Cart::new();
    cart.add_product(&sabun).unwrap();
    let receipt = books
        .checkout(&mut cart, Tender::new(PaymentMethod::Transfer, None), d(5))
        .unwrap();
    assert_eq!(receipt.customer, "Umum");
    assert_eq!(receipt.cash_received, None);
}

#[test]
fn test_records_serialize_with_display_labels() {
    let books = month_of_trading();
    let purchase = &books.purchases(&PurchaseFilter::default())[0];

    let json = serde_json::to_value(purchase).unwrap();
    assert_eq!(json["status"], "Belum Lunas");
    assert_eq!(json["amount"], 300_000);
    assert_eq!(json["items"][0]["productName"], "Minyak Goreng 1L");
}
