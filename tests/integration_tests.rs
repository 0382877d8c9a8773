use std::collections::{HashMap, HashSet};
use std::thread;

use elizaos_plugin_storefront_chat::catalog::FEATURED_PRODUCTS;
use elizaos_plugin_storefront_chat::config::DEFAULT_EMPTY_PROMPT;
use elizaos_plugin_storefront_chat::{
    format_usd, reflect, FixedPicker, Responder, ResponderPool, RngPicker, SuggestionStyle,
};
use pretty_assertions::assert_eq;

fn deterministic() -> Responder {
    Responder::builder().picker(FixedPicker(0)).build()
}

#[test]
fn test_non_empty_input_always_gets_text() {
    let responder = Responder::builder().picker(RngPicker::seeded(42)).build();
    for input in [
        "hello",
        "?",
        "...",
        "no",
        "why",
        "I am",
        "i need",
        "Could you",
        "🙂",
        "what is the price of the Holy Panda?",
    ] {
        let reply = responder.respond(input);
        assert!(!reply.text.trim().is_empty(), "empty reply for {input:?}");
    }
}

#[test]
fn test_blank_input_gets_prompt_and_never_a_suggestion() {
    let responder = deterministic();
    for _ in 0..6 {
        for input in ["", "   ", "\n\t"] {
            let reply = responder.respond(input);
            assert_eq!(reply.text, DEFAULT_EMPTY_PROMPT);
            assert!(reply.suggestion.is_none());
        }
    }
}

#[test]
fn test_earlier_rule_wins() {
    let responder = deterministic();
    // Also matches the support rule.
    assert_eq!(responder.respond("I need help").text, "Why do you need help?");
    // Also matches the why rule.
    assert_eq!(
        responder.respond("why is my order late").text,
        "Are you asking about a recent order?"
    );
}

#[test]
fn test_reflection_round_trip() {
    assert_eq!(reflect("i am happy"), "you are happy");
    assert_eq!(reflect("my keyboard, my rules!"), "your keyboard, your rules!");
}

#[test]
fn test_placeholder_carries_reflected_capture() {
    let responder = deterministic();
    assert_eq!(
        responder.respond("Can you show me my cart").text,
        "What makes you think I can show you your cart?"
    );
    assert_eq!(
        responder.respond("I'm tired of My Switches").text,
        "How does being tired of your switches make you feel?"
    );
}

#[test]
fn test_suggestion_on_every_third_call() {
    let responder = Responder::new();
    for call in 1..=30 {
        let reply = responder.respond("tell me about keycaps");
        assert_eq!(reply.suggestion.is_some(), call % 3 == 0, "call {call}");
    }
}

#[test]
fn test_products_and_styles_rotate_without_repeats() {
    let responder = deterministic();
    let n = FEATURED_PRODUCTS.len();
    let suggestions: Vec<_> = (0..n * 3)
        .filter_map(|_| responder.respond("hello").suggestion)
        .collect();
    assert_eq!(suggestions.len(), n);

    let slugs: Vec<_> = suggestions.iter().map(|s| s.product.slug.clone()).collect();
    let unique: HashSet<_> = slugs.iter().collect();
    assert_eq!(unique.len(), n);
    assert_eq!(slugs[0], FEATURED_PRODUCTS[0].slug);

    for window in suggestions.chunks(3).filter(|c| c.len() == 3) {
        let styles: HashSet<_> = window.iter().map(|s| s.style).collect();
        assert_eq!(styles.len(), 3);
    }

    let next = (0..3).find_map(|_| responder.respond("hello").suggestion).unwrap();
    assert_eq!(next.product.slug, FEATURED_PRODUCTS[0].slug);
}

#[test]
fn test_style_specific_shapes() {
    let responder = deterministic();
    let suggestions: Vec<_> = (0..9)
        .filter_map(|_| responder.respond("hello").suggestion)
        .collect();
    assert_eq!(suggestions.len(), 3);

    let highlight = &suggestions[0];
    assert_eq!(highlight.style, SuggestionStyle::Highlight);
    assert!(highlight
        .blurb
        .contains(&format_usd(FEATURED_PRODUCTS[0].price_cents)));

    let card = &suggestions[1];
    assert_eq!(card.style, SuggestionStyle::Card);
    assert!(card.cta_label.as_deref().is_some_and(|l| !l.is_empty()));

    let navigate = &suggestions[2];
    assert_eq!(navigate.style, SuggestionStyle::Navigate);
    assert!(navigate.auto_navigate);
    assert!(navigate.navigate_to.as_deref().is_some_and(|p| !p.is_empty()));
}

#[test]
fn test_quiet_keyboard_example() {
    let expected = [
        "Why do you need a quiet keyboard?",
        "Would having a quiet keyboard really solve your concerns?",
        "What would it mean if you got a quiet keyboard?",
    ];
    let responder = Responder::new();
    for _ in 0..20 {
        let text = responder.respond("I need a quiet keyboard").text;
        assert!(expected.contains(&text.as_str()), "unexpected reply: {text}");
    }
}

#[test]
fn test_empty_string_example() {
    let reply = Responder::new().respond("");
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        serde_json::json!({ "text": DEFAULT_EMPTY_PROMPT })
    );
}

#[test]
fn test_pool_keeps_conversations_apart() {
    let pool = ResponderPool::default();
    for _ in 0..2 {
        assert!(pool.respond("alice", "hello").suggestion.is_none());
    }
    assert!(pool.respond("bob", "hello").suggestion.is_none());
    let third = pool.respond("alice", "hello").suggestion.unwrap();
    assert_eq!(third.style, SuggestionStyle::Highlight);
}

#[test]
fn test_reply_wire_format() {
    let responder = deterministic();
    responder.respond("a");
    responder.respond("b");
    let value = serde_json::to_value(responder.respond("c")).unwrap();
    let suggestion = &value["suggestion"];
    assert_eq!(suggestion["style"], "highlight");
    assert_eq!(suggestion["product"]["formattedPrice"], "$149.99");
    assert_eq!(suggestion["autoNavigate"], false);
    assert!(suggestion.get("ctaLabel").is_none());
}

#[test]
fn test_shared_responder_keeps_cadence_across_threads() {
    const THREADS: usize = 4;
    const CALLS_PER_THREAD: usize = 36;

    let responder = deterministic();
    let suggestions: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..CALLS_PER_THREAD)
                        .filter_map(|_| responder.respond("show me keycaps").suggestion)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let total = THREADS * CALLS_PER_THREAD;
    assert_eq!(responder.call_count(), total as u64);
    assert_eq!(suggestions.len(), total / 3);

    // Every product and style is handed out equally often.
    let mut per_product: HashMap<String, usize> = HashMap::new();
    let mut per_style: HashMap<SuggestionStyle, usize> = HashMap::new();
    for s in &suggestions {
        *per_product.entry(s.product.slug.clone()).or_default() += 1;
        *per_style.entry(s.style).or_default() += 1;
    }
    assert_eq!(per_product.len(), FEATURED_PRODUCTS.len());
    assert!(per_product
        .values()
        .all(|&n| n == suggestions.len() / FEATURED_PRODUCTS.len()));
    assert!(per_style.values().all(|&n| n == suggestions.len() / 3));
}
