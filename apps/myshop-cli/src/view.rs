//! # Views
//!
//! Text rendering of the storefront pages. Every function here is pure:
//! it takes responses or core types and returns a `String`.
//!
//! ## Shop Page Layout
//! ```text
//! 나의 가게
//! ══════════
//!    홈  │ [상점] │  할 일
//!
//! 오늘의 추천 상품  ‹무료배송 · 당일출고›
//!   #1 [사과] 사과  1,000원  담기 → add 1
//!   #2 [딸기] 딸기 ‹HOT›  24,000원  ~30,000원~ -20%  담기 → add 2
//!   ...
//!
//! 장바구니
//!   #1 사과   단가: 1,000 원   수량: 2   2,000 원   (-1 → remove 1, 취소 → clear 1)
//!   상품합계   2,000 원
//!   배송비     3,000 원
//!   결제금액   5,000 원
//!   전체 구매하기 (2개) → buy   전체 취소하기 → reset
//!
//! Wallet   잔액 · 100,000원
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use myshop_core::{CartSummary, Good, TodoItem, Won};

use crate::commands::shop::PurchaseResponse;
use crate::error::{ApiError, CliError};
use crate::state::ConfigState;

pub const HERO_TITLE: &str = "오늘의 추천 상품";
pub const HERO_TAG: &str = "무료배송 · 당일출고";
pub const EMPTY_CART: &str = "장바구니가 비어 있어요. 지금 베스트 상품을 담아보세요! 🛒";
pub const WELCOME_TITLE: &str = "환영합니다! 🥸";
pub const WELCOME_BODY: &str = "여기는 나의 가게 홈페이지입니다.";

// =============================================================================
// Pages
// =============================================================================

/// Routed pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Shop,
    Todos,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Shop, Page::Todos];

    /// Label in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "홈",
            Page::Shop => "상점",
            Page::Todos => "할 일",
        }
    }
}

impl FromStr for Page {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "홈" => Ok(Page::Home),
            "shop" | "상점" => Ok(Page::Shop),
            "todos" | "todo" | "할 일" => Ok(Page::Todos),
            other => Err(CliError::InvalidArgument {
                argument: "page".to_string(),
                reason: format!("unknown page '{}' (home, shop, todos)", other),
            }),
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Home => write!(f, "home"),
            Page::Shop => write!(f, "shop"),
            Page::Todos => write!(f, "todos"),
        }
    }
}

// =============================================================================
// Header & Navigation
// =============================================================================

/// Store title plus the navigation bar with the active page in brackets.
pub fn render_header(config: &ConfigState, active: Page) -> String {
    let underline = "═".repeat(config.store_name.chars().count() * 2);
    let nav: Vec<String> = Page::ALL
        .iter()
        .map(|page| {
            if *page == active {
                format!("[{}]", page.label())
            } else {
                format!(" {} ", page.label())
            }
        })
        .collect();

    format!("{}\n{}\n  {}\n", config.store_name, underline, nav.join(" │ "))
}

pub fn render_home() -> String {
    format!("\n  {}\n  {}\n", WELCOME_TITLE, WELCOME_BODY)
}

// =============================================================================
// Catalog
// =============================================================================

/// One catalog card on a single line.
///
/// Shows the placeholder initials when the good has no image, the star row
/// when it has a rating, and the struck list price plus discount badge when
/// it is on sale.
pub fn render_good_card(good: &Good) -> String {
    let thumb = match &good.image {
        Some(_) => "🖼".to_string(),
        None => good.initials(),
    };
    let mut line = format!("#{} [{}] {}", good.id, thumb, good.name);

    if let Some(badge) = good.badge {
        line.push_str(&format!(" ‹{}›", badge));
    }
    if let Some(rating) = good.rating {
        line.push(' ');
        line.push_str(&rating.stars());
    }

    line.push_str(&format!("  {}", good.unit_price()));
    if good.is_on_sale() {
        line.push_str(&format!("  ~{}~", good.price));
        let dc = good.discount_percent();
        if dc > 0 {
            line.push_str(&format!(" -{}%", dc));
        }
    }

    line.push_str(&format!("  담기 → add {}", good.id));
    line
}

pub fn render_goods(goods: &[Good]) -> String {
    let mut out = format!("\n{}  ‹{}›\n", HERO_TITLE, HERO_TAG);
    for good in goods {
        out.push_str("  ");
        out.push_str(&render_good_card(good));
        out.push('\n');
    }
    out
}

// =============================================================================
// Cart & Wallet
// =============================================================================

pub fn render_cart(summary: &CartSummary, config: &ConfigState) -> String {
    let mut out = String::from("\n장바구니\n");

    if summary.is_empty() {
        out.push_str(&format!("  {}\n", EMPTY_CART));
        return out;
    }

    for line in &summary.lines {
        out.push_str(&format!(
            "  #{} {}   단가: {}   수량: {}   {}   (-1 → remove {}, 취소 → clear {})\n",
            line.id,
            line.name,
            config.format_currency(line.unit_price),
            line.qty,
            config.format_currency(line.line_total),
            line.id,
            line.id,
        ));
    }

    let shipping = if summary.shipping.is_zero() {
        "무료".to_string()
    } else {
        config.format_currency(summary.shipping)
    };

    out.push_str(&format!("  상품합계   {}\n", config.format_currency(summary.subtotal)));
    out.push_str(&format!("  배송비     {}\n", shipping));
    out.push_str(&format!("  결제금액   {}\n", config.format_currency(summary.total)));
    out.push_str(&format!(
        "  전체 구매하기 ({}개) → buy   전체 취소하기 → reset\n",
        summary.total_qty
    ));
    out
}

pub fn render_wallet(balance: Won) -> String {
    format!("\nWallet   잔액 · {}\n", balance)
}

/// Catalog, cart and wallet together.
pub fn render_shop_page(
    goods: &[Good],
    summary: &CartSummary,
    balance: Won,
    config: &ConfigState,
) -> String {
    let mut out = render_goods(goods);
    out.push_str(&render_cart(summary, config));
    out.push_str(&render_wallet(balance));
    out
}

pub fn render_purchase(purchase: &PurchaseResponse) -> String {
    if purchase.lines.is_empty() {
        return format!("\n{}\n", EMPTY_CART);
    }

    let mut out = String::from("\n구매 완료!\n");
    for line in &purchase.lines {
        out.push_str(&format!("  {} x{}   {}\n", line.name, line.qty, line.line_total));
    }
    out.push_str(&format!("  결제   {}\n", purchase.total));
    out.push_str(&format!("  잔액 · {}\n", purchase.balance));
    out
}

// =============================================================================
// Todos
// =============================================================================

pub fn render_todos(todos: &[TodoItem]) -> String {
    let mut out = String::from("\nTodoList\n");
    if todos.is_empty() {
        out.push_str("  (비어 있음) → todo add <제목>\n");
        return out;
    }

    for item in todos {
        let mark = if item.completed { "x" } else { " " };
        out.push_str(&format!("  [{}] {}  ({})\n", mark, item.title, item.id));
    }
    out
}

// =============================================================================
// Messages
// =============================================================================

pub fn render_error(err: &ApiError) -> String {
    format!("⚠ {}\n", err.message)
}

/// Note shown when a command named an unknown id.
pub fn render_unchanged() -> String {
    "(변경 없음)\n".to_string()
}

pub fn render_help() -> String {
    "\
명령어
  goods                  상품 목록
  cart                   장바구니
  wallet                 잔액
  add <id>               담기
  remove <id>            한 개 빼기 (-1)
  clear <id>             줄 취소
  reset                  전체 취소하기
  buy                    전체 구매하기
  page <home|shop|todos> 페이지 이동
  todos                  할 일 목록
  todo add <제목>
  todo toggle <id>
  todo delete <id>
  todo edit <id> <제목>
  help                   도움말
  quit                   종료
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use myshop_core::{Badge, CartLine, GoodId, ShippingPolicy};

    #[test]
    fn test_nav_highlights_active_page() {
        let header = render_header(&ConfigState::default(), Page::Shop);

        assert!(header.starts_with("나의 가게\n"));
        assert!(header.contains("[상점]"));
        assert!(!header.contains("[홈]"));
    }

    #[test]
    fn test_page_parse() {
        assert_eq!("shop".parse::<Page>().unwrap(), Page::Shop);
        assert_eq!(" HOME ".parse::<Page>().unwrap(), Page::Home);
        assert!("admin".parse::<Page>().is_err());
    }

    #[test]
    fn test_good_card_on_sale() {
        let good = Good::new(2, "딸기", 30_000)
            .with_sale_price(24_000)
            .with_badge(Badge::Hot)
            .with_rating(4.2);
        let card = render_good_card(&good);

        assert!(card.contains("[딸기]"));
        assert!(card.contains("‹HOT›"));
        assert!(card.contains("★★★★☆"));
        assert!(card.contains("24,000원"));
        assert!(card.contains("~30,000원~"));
        assert!(card.contains("-20%"));
        assert!(card.ends_with("담기 → add 2"));
    }

    #[test]
    fn test_good_card_plain() {
        let card = render_good_card(&Good::new(1, "사과", 1_000));
        assert!(card.contains("1,000원"));
        assert!(!card.contains('%'));
    }

    #[test]
    fn test_empty_cart_message() {
        let summary = CartSummary::compute(&[], &[], &ShippingPolicy::default());
        assert!(render_cart(&summary, &ConfigState::default()).contains(EMPTY_CART));
    }

    #[test]
    fn test_cart_free_shipping_label() {
        let goods = vec![Good::new(2, "딸기", 30_000)];
        let cart = vec![CartLine { id: GoodId::new(2), qty: 2 }];
        let summary = CartSummary::compute(&goods, &cart, &ShippingPolicy::default());
        let text = render_cart(&summary, &ConfigState::default());

        assert!(text.contains("배송비     무료"));
        assert!(text.contains("결제금액   60,000 원"));
        assert!(text.contains("전체 구매하기 (2개)"));
    }

    #[test]
    fn test_wallet_banner() {
        assert_eq!(render_wallet(Won::new(98_000)), "\nWallet   잔액 · 98,000원\n");
    }
}
