//! AFINN-style polarity lexicon. Weights range from -5 (very negative) to
//! +5 (very positive); tokens not listed score 0.

pub const LEXICON: &[(&str, i32)] = &[
    // General vocabulary
    ("abandon", -2), ("abandoned", -2), ("abuse", -3), ("accept", 1),
    ("accepted", 1), ("accomplish", 2), ("accomplished", 2), ("accusation", -2),
    ("accuse", -2), ("accused", -2), ("achieve", 2), ("achievement", 2),
    ("admire", 3), ("admit", -1), ("adore", 3), ("advantage", 2),
    ("advantages", 2), ("afraid", -2), ("aggressive", -2), ("agree", 1),
    ("alarm", -2), ("alarmed", -2), ("alert", -1), ("amazing", 4),
    ("anger", -3), ("angry", -3), ("annoy", -2), ("annoyed", -2),
    ("anxiety", -2), ("anxious", -2), ("applaud", 2), ("appreciate", 2),
    ("approval", 2), ("approved", 2), ("arrest", -2), ("arrested", -3),
    ("attack", -1), ("attacked", -1), ("awesome", 4), ("awful", -3),
    ("bad", -3), ("ban", -2), ("banned", -2), ("bankrupt", -3),
    ("bankruptcy", -3), ("beautiful", 3), ("benefit", 2), ("benefits", 2),
    ("best", 3), ("better", 2), ("blame", -2), ("blamed", -2),
    ("bless", 2), ("block", -1), ("blocked", -2), ("bold", 2),
    ("boom", 2), ("boost", 1), ("boosted", 1), ("bore", -2),
    ("bored", -2), ("breach", -2), ("breakthrough", 3), ("bright", 1),
    ("brilliant", 4), ("broke", -1), ("broken", -1), ("bullish", 2),
    ("bearish", -2), ("burden", -2), ("calm", 2), ("care", 2),
    ("careful", 2), ("catastrophe", -3), ("catastrophic", -4), ("cautious", -1),
    ("celebrate", 3), ("celebrated", 3), ("chaos", -2), ("cheat", -3),
    ("cheated", -3), ("cheer", 2), ("clean", 2), ("clear", 1),
    ("collapse", -2), ("collapsed", -2), ("comfortable", 2), ("commit", 1),
    ("committed", 1), ("complain", -2), ("complaint", -2), ("confidence", 2),
    ("confident", 2), ("conflict", -2), ("confuse", -2), ("confused", -2),
    ("congrats", 2), ("congratulations", 2), ("conspiracy", -3), ("cool", 1),
    ("corrupt", -3), ("corruption", -3), ("cost", -1), ("crash", -2),
    ("crashed", -2), ("crashes", -2), ("crime", -3), ("criminal", -3),
    ("crisis", -3), ("critical", -2), ("criticism", -2), ("criticize", -2),
    ("crush", -1), ("crushed", -2), ("cut", -1), ("damage", -3),
    ("damaged", -3), ("danger", -2), ("dangerous", -2), ("dead", -3),
    ("debt", -2), ("decline", -1), ("declined", -1), ("declines", -1),
    ("defeat", -2), ("defeated", -2), ("deficit", -2), ("delay", -1),
    ("delayed", -1), ("delight", 3), ("delighted", 3), ("deny", -1),
    ("denied", -2), ("depressed", -2), ("desire", 1), ("despair", -3),
    ("destroy", -3), ("destroyed", -3), ("destruction", -3), ("devastating", -2),
    ("difficult", -1), ("dire", -3), ("disappoint", -2), ("disappointed", -2),
    ("disappointing", -2), ("disaster", -2), ("disastrous", -3), ("dispute", -2),
    ("doubt", -1), ("doubts", -1), ("drop", -1), ("dropped", -1),
    ("dump", -1), ("dumped", -2), ("eager", 2), ("ease", 2),
    ("easy", 1), ("effective", 2), ("efficient", 2), ("embarrass", -2),
    ("emergency", -2), ("encourage", 2), ("encouraged", 2), ("encouraging", 2),
    ("energetic", 2), ("enjoy", 2), ("enthusiastic", 3), ("error", -2),
    ("errors", -2), ("escape", -1), ("evil", -3), ("exaggerate", -2),
    ("excellent", 3), ("excited", 3), ("exciting", 3), ("exploit", -2),
    ("exploited", -2), ("fail", -2), ("failed", -2), ("failing", -2),
    ("failure", -2), ("fair", 2), ("fake", -3), ("fantastic", 4),
    ("fear", -2), ("fearful", -2), ("fears", -2), ("fine", 2),
    ("fined", -2), ("flop", -2), ("fool", -2), ("fraud", -4),
    ("fraudulent", -4), ("free", 1), ("freeze", -1), ("friendly", 2),
    ("frustrated", -2), ("fun", 4), ("gain", 2), ("gained", 2),
    ("gains", 2), ("glad", 3), ("gloom", -1), ("gloomy", -2),
    ("good", 3), ("great", 3), ("greed", -3), ("greedy", -2),
    ("grow", 1), ("growing", 1), ("growth", 2), ("guilty", -3),
    ("hack", -1), ("hacked", -1), ("happy", 3), ("hard", -1),
    ("harm", -2), ("harmed", -2), ("hate", -3), ("healthy", 2),
    ("help", 2), ("helpful", 2), ("hope", 2), ("hopeful", 2),
    ("hopes", 2), ("horrible", -3), ("hurt", -2), ("illegal", -3),
    ("impress", 3), ("impressed", 3), ("impressive", 3), ("improve", 2),
    ("improved", 2), ("improvement", 2), ("innovative", 2), ("insecure", -2),
    ("inspire", 2), ("inspired", 2), ("interest", 1), ("interested", 2),
    ("investigate", -1), ("investigation", -1), ("joy", 3), ("kill", -3),
    ("killed", -3), ("lack", -2), ("lawsuit", -2), ("lead", 1),
    ("leading", 2), ("liar", -3), ("lie", -2), ("like", 2),
    ("lose", -3), ("loses", -3), ("losing", -3), ("loss", -3),
    ("losses", -3), ("lost", -3), ("love", 3), ("loved", 3),
    ("lucky", 3), ("mad", -3), ("manipulation", -1), ("mess", -2),
    ("miss", -2), ("missed", -2), ("mistake", -2), ("mistakes", -2),
    ("nervous", -2), ("nice", 3), ("no", -1), ("optimism", 2),
    ("optimistic", 2), ("outstanding", 5), ("pain", -2), ("panic", -3),
    ("panicked", -3), ("penalty", -2), ("perfect", 3), ("pessimistic", -2),
    ("plunge", -2), ("plunged", -2), ("plunges", -2), ("poor", -2),
    ("popular", 3), ("positive", 2), ("powerful", 2), ("pressure", -1),
    ("profit", 2), ("profitable", 2), ("profits", 2), ("progress", 2),
    ("promising", 2), ("prosperous", 3), ("protect", 1), ("protest", -2),
    ("proud", 2), ("rally", 2), ("rallied", 2), ("recession", -2),
    ("recover", 2), ("recovery", 2), ("regret", -2), ("reject", -1),
    ("rejected", -1), ("relief", 1), ("reliable", 2), ("rescue", 2),
    ("restrict", -2), ("restricted", -2), ("reward", 2), ("rich", 2),
    ("risk", -2), ("risks", -2), ("risky", -2), ("robust", 2),
    ("ruin", -2), ("sad", -2), ("safe", 1), ("safety", 1),
    ("scam", -2), ("scandal", -3), ("scared", -2), ("secure", 2),
    ("shock", -2), ("shocked", -2), ("slump", -2), ("smart", 1),
    ("solid", 2), ("soar", 2), ("soared", 2), ("soaring", 2),
    ("steal", -2), ("stole", -2), ("stolen", -2), ("strong", 2),
    ("stronger", 2), ("struggle", -2), ("struggling", -2), ("stuck", -2),
    ("success", 2), ("successful", 3), ("suffer", -2), ("support", 2),
    ("supported", 2), ("surge", 1), ("surged", 1), ("surges", 1),
    ("surprise", 1), ("suspect", -1), ("suspicious", -2), ("terrible", -3),
    ("theft", -2), ("threat", -2), ("threaten", -2), ("top", 2),
    ("tragedy", -2), ("trouble", -2), ("trust", 1), ("trusted", 2),
    ("uncertain", -1), ("uncertainty", -1), ("unstable", -2), ("upset", -2),
    ("urgent", -1), ("useful", 2), ("vague", -2), ("victory", 3),
    ("violate", -2), ("violation", -2), ("volatile", -2), ("vulnerable", -2),
    ("warn", -2), ("warned", -2), ("warning", -3), ("weak", -2),
    ("weakness", -2), ("wealth", 3), ("win", 4), ("winner", 4),
    ("winning", 4), ("wins", 4), ("won", 3), ("worried", -3),
    ("worry", -3), ("worse", -3), ("worst", -3), ("wow", 4),
    ("wrong", -2), ("yes", 1),
    // Market vocabulary
    ("accumulate", 1), ("adoption", 2), ("all-time", 1), ("breakout", 2),
    ("buyback", 1), ("capitulation", -3), ("correction", -1), ("delisted", -3),
    ("delisting", -3), ("dip", -1), ("downgrade", -2), ("downgraded", -2),
    ("downtrend", -2), ("hodl", 1), ("liquidated", -2),
    ("liquidation", -2), ("moon", 2), ("outperform", 2), ("partnership", 2),
    ("rebound", 2), ("rebounded", 2), ("rugpull", -4), ("selloff", -2),
    ("sell-off", -2), ("skyrocket", 3), ("skyrocketed", 3), ("tumble", -2),
    ("tumbled", -2), ("underperform", -2), ("upgrade", 2), ("upgraded", 2),
    ("uptrend", 2),
];
